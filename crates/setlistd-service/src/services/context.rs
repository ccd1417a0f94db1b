//! Service context - dependency container for services
//!
//! Holds all repositories and outbound ports needed by services.

use std::sync::Arc;

use setlistd_common::SupabaseConfig;
use setlistd_core::{
    ConcertListRepository, EventCatalog, EventRepository, FollowRepository, IdentityProvider,
    ObjectStorage, PostRepository, ReviewRepository, UploadKind, UserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Storage bucket names per upload kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageBuckets {
    pub profile: String,
    pub banner: String,
    pub media: String,
}

impl StorageBuckets {
    pub fn for_kind(&self, kind: UploadKind) -> &str {
        match kind {
            UploadKind::ProfilePicture => &self.profile,
            UploadKind::Banner => &self.banner,
            UploadKind::PostMedia => &self.media,
        }
    }
}

impl Default for StorageBuckets {
    fn default() -> Self {
        Self {
            profile: "profile-images".to_string(),
            banner: "banner-images".to_string(),
            media: "post-media".to_string(),
        }
    }
}

impl From<&SupabaseConfig> for StorageBuckets {
    fn from(config: &SupabaseConfig) -> Self {
        Self {
            profile: config.profile_bucket.clone(),
            banner: config.banner_bucket.clone(),
            media: config.media_bucket.clone(),
        }
    }
}

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - The identity provider, object storage and events catalog
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    event_repo: Arc<dyn EventRepository>,
    review_repo: Arc<dyn ReviewRepository>,
    concert_list_repo: Arc<dyn ConcertListRepository>,
    post_repo: Arc<dyn PostRepository>,

    // External services
    identity: Arc<dyn IdentityProvider>,
    storage: Arc<dyn ObjectStorage>,
    catalog: Arc<dyn EventCatalog>,

    buckets: StorageBuckets,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        follow_repo: Arc<dyn FollowRepository>,
        event_repo: Arc<dyn EventRepository>,
        review_repo: Arc<dyn ReviewRepository>,
        concert_list_repo: Arc<dyn ConcertListRepository>,
        post_repo: Arc<dyn PostRepository>,
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn ObjectStorage>,
        catalog: Arc<dyn EventCatalog>,
        buckets: StorageBuckets,
    ) -> Self {
        Self {
            user_repo,
            follow_repo,
            event_repo,
            review_repo,
            concert_list_repo,
            post_repo,
            identity,
            storage,
            catalog,
            buckets,
        }
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the follow repository
    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    /// Get the event repository
    pub fn event_repo(&self) -> &dyn EventRepository {
        self.event_repo.as_ref()
    }

    /// Get the review repository
    pub fn review_repo(&self) -> &dyn ReviewRepository {
        self.review_repo.as_ref()
    }

    /// Get the concert list repository
    pub fn concert_list_repo(&self) -> &dyn ConcertListRepository {
        self.concert_list_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    // === External Services ===

    /// Get the identity provider
    pub fn identity(&self) -> &dyn IdentityProvider {
        self.identity.as_ref()
    }

    /// Get the object storage
    pub fn storage(&self) -> &dyn ObjectStorage {
        self.storage.as_ref()
    }

    /// Get the events catalog
    pub fn catalog(&self) -> &dyn EventCatalog {
        self.catalog.as_ref()
    }

    pub fn buckets(&self) -> &StorageBuckets {
        &self.buckets
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("external", &"...")
            .field("buckets", &self.buckets)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    event_repo: Option<Arc<dyn EventRepository>>,
    review_repo: Option<Arc<dyn ReviewRepository>>,
    concert_list_repo: Option<Arc<dyn ConcertListRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    storage: Option<Arc<dyn ObjectStorage>>,
    catalog: Option<Arc<dyn EventCatalog>>,
    buckets: Option<StorageBuckets>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn event_repo(mut self, repo: Arc<dyn EventRepository>) -> Self {
        self.event_repo = Some(repo);
        self
    }

    pub fn review_repo(mut self, repo: Arc<dyn ReviewRepository>) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn concert_list_repo(mut self, repo: Arc<dyn ConcertListRepository>) -> Self {
        self.concert_list_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn ObjectStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn catalog(mut self, catalog: Arc<dyn EventCatalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn buckets(mut self, buckets: StorageBuckets) -> Self {
        self.buckets = Some(buckets);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.follow_repo.ok_or_else(|| ServiceError::validation("follow_repo is required"))?,
            self.event_repo.ok_or_else(|| ServiceError::validation("event_repo is required"))?,
            self.review_repo.ok_or_else(|| ServiceError::validation("review_repo is required"))?,
            self.concert_list_repo
                .ok_or_else(|| ServiceError::validation("concert_list_repo is required"))?,
            self.post_repo.ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.identity.ok_or_else(|| ServiceError::validation("identity is required"))?,
            self.storage.ok_or_else(|| ServiceError::validation("storage is required"))?,
            self.catalog.ok_or_else(|| ServiceError::validation("catalog is required"))?,
            self.buckets.unwrap_or_default(),
        ))
    }
}
