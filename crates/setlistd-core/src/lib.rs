//! # setlistd-core
//!
//! Domain layer containing entities, value objects, repository traits and the
//! ports used to reach external services (identity provider, object storage,
//! events catalog).
//! This crate has zero dependencies on infrastructure (database, web framework, HTTP client).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, Event, EventListing, EventStats, GeoPoint, Genre, Performer, Post, Review,
    SocialLinks, Taxonomy, User, UserProfileUpdate, Venue,
};
pub use error::DomainError;
pub use traits::{
    AuthSession, CatalogPage, CatalogQuery, ConcertListRepository, EventCatalog, EventPage,
    EventQuery, EventRepository, FollowCounts, FollowRepository, Identity, IdentityProvider,
    ObjectStorage, PostRepository, RepoResult, ReviewRepository, UserRepository,
};
pub use value_objects::{
    ConcertList, ConcertListParseError, Media, MediaKind, Rating, RatingSummary, UploadKind,
};
