//! Domain entities - core business objects

mod event;
mod post;
mod review;
mod user;

pub use event::{Event, EventListing, EventStats, GeoPoint, Genre, Performer, Taxonomy, Venue};
pub use post::{Comment, Post};
pub use review::Review;
pub use user::{SocialLinks, User, UserProfileUpdate};
