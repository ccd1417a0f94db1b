//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod artist;
pub mod auth;
pub mod concert_list;
pub mod context;
pub mod error;
pub mod event;
pub mod follow;
pub mod post;
pub mod review;
pub mod upload;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use artist::ArtistService;
pub use auth::AuthService;
pub use concert_list::ConcertListService;
pub use context::{ServiceContext, ServiceContextBuilder, StorageBuckets};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use follow::FollowService;
pub use post::PostService;
pub use review::ReviewService;
pub use upload::{FileUpload, UploadService};
pub use user::UserService;
