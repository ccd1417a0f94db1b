//! Ports for the external collaborators: identity provider, object storage
//! and the events catalog.

use async_trait::async_trait;

use super::repositories::RepoResult;
use crate::entities::EventListing;

// ============================================================================
// Identity Provider
// ============================================================================

/// Authenticated account as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    pub email: String,
    /// `username` from the account metadata, if set at signup
    pub username: Option<String>,
}

/// Tokens issued on signup or login. Signup may return no session when
/// email confirmation is pending.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub identity: Identity,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolve a bearer token; `None` when the provider rejects it
    async fn verify(&self, token: &str) -> RepoResult<Option<Identity>>;

    async fn sign_up(&self, email: &str, password: &str) -> RepoResult<AuthSession>;

    /// Password login; `None` on bad credentials
    async fn sign_in(&self, email: &str, password: &str) -> RepoResult<Option<AuthSession>>;

    async fn sign_out(&self, token: &str) -> RepoResult<()>;
}

// ============================================================================
// Object Storage
// ============================================================================

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload bytes under `bucket/key` and return the public URL
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> RepoResult<String>;
}

// ============================================================================
// Events Catalog
// ============================================================================

/// Live catalog search parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub q: String,
    pub page: u32,
    pub per_page: u32,
    /// Comma separated event types
    pub event_type: String,
    pub city: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            q: "concert".to_string(),
            page: 1,
            per_page: 20,
            event_type: "concert,music_festival".to_string(),
            city: None,
            from_date: None,
            to_date: None,
        }
    }
}

/// One page of catalog results
#[derive(Debug, Clone, Default)]
pub struct CatalogPage {
    pub events: Vec<EventListing>,
    pub total: Option<i64>,
    pub page: u32,
    pub per_page: u32,
}

#[async_trait]
pub trait EventCatalog: Send + Sync {
    async fn search(&self, query: &CatalogQuery) -> RepoResult<CatalogPage>;
}
