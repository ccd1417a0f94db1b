//! Value objects - immutable types that represent domain concepts

mod concert_list;
mod media;
mod rating;

pub use concert_list::{ConcertList, ConcertListParseError};
pub use media::{Media, MediaKind, UploadKind};
pub use rating::{Rating, RatingSummary};
