//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in setlistd-core.
//! Each repository handles database operations for a specific domain entity.

mod concert_list;
mod error;
mod event;
mod follow;
mod post;
mod review;
mod user;

pub use concert_list::PgConcertListRepository;
pub use event::PgEventRepository;
pub use follow::PgFollowRepository;
pub use post::PgPostRepository;
pub use review::PgReviewRepository;
pub use user::PgUserRepository;
