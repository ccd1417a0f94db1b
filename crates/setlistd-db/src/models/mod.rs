//! Database models - SQLx-compatible structs for PostgreSQL tables

mod event;
mod post;
mod review;
mod user;

pub use event::EventModel;
pub use post::{CommentModel, PostLikeModel, PostModel};
pub use review::ReviewModel;
pub use user::{FollowCountsModel, UserModel};
