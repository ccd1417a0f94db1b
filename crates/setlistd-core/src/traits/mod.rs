//! Traits (ports) implemented by the infrastructure crates

mod ports;
mod repositories;

pub use ports::{
    AuthSession, CatalogPage, CatalogQuery, EventCatalog, Identity, IdentityProvider,
    ObjectStorage,
};
pub use repositories::{
    ConcertListRepository, EventPage, EventQuery, EventRepository, FollowCounts,
    FollowRepository, PostRepository, RepoResult, ReviewRepository, UserRepository,
};
