//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::entities::{Comment, Event, EventListing, Post, Review, User};
use crate::error::DomainError;
use crate::value_objects::{ConcertList, RatingSummary};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>>;

    /// Find user by exact username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Case-insensitive substring search on username
    async fn search_by_username(&self, query: &str, limit: i64) -> RepoResult<Vec<User>>;

    /// Create a new user. Fails with `UsernameTaken` or `EmailAlreadyExists`.
    async fn create(&self, user: &User) -> RepoResult<()>;

    /// Persist profile fields (bio, location, links, privacy, pictures)
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Add `delta` to the denormalized post counter
    async fn adjust_posts_count(&self, id: &str, delta: i32) -> RepoResult<()>;
}

// ============================================================================
// Follow Repository
// ============================================================================

/// Follower and following totals for a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowCounts {
    pub followers: i64,
    pub following: i64,
}

#[async_trait]
pub trait FollowRepository: Send + Sync {
    async fn is_following(&self, follower_id: &str, followee_id: &str) -> RepoResult<bool>;

    /// Record a follow. Fails with `AlreadyFollowing` if present.
    async fn follow(&self, follower_id: &str, followee_id: &str) -> RepoResult<()>;

    /// Remove a follow, returning whether one existed
    async fn unfollow(&self, follower_id: &str, followee_id: &str) -> RepoResult<bool>;

    /// Users following `user_id`, oldest first
    async fn followers(&self, user_id: &str) -> RepoResult<Vec<User>>;

    /// Users that `user_id` follows, oldest first
    async fn following(&self, user_id: &str) -> RepoResult<Vec<User>>;

    async fn following_ids(&self, user_id: &str) -> RepoResult<Vec<String>>;

    async fn counts(&self, user_id: &str) -> RepoResult<FollowCounts>;
}

// ============================================================================
// Event Repository
// ============================================================================

/// Filters for saved-event queries
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Matches title or performer name
    pub text: Option<String>,
    pub city: Option<String>,
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
    pub limit: i64,
    pub offset: i64,
}

/// One page of events and the total number of matches
#[derive(Debug, Clone, Default)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub total: i64,
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Find event by internal ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Event>>;

    /// Find event by its catalog ID
    async fn find_by_seatgeek_id(&self, seatgeek_id: i64) -> RepoResult<Option<Event>>;

    /// Insert or refresh catalog data, keeping id, aggregate and creation time
    async fn upsert(&self, listing: &EventListing) -> RepoResult<Event>;

    /// Filtered, paginated listing ordered by local start time
    async fn search(&self, query: &EventQuery) -> RepoResult<EventPage>;

    /// Events with a performer whose name contains `name` (case-insensitive)
    async fn find_by_performer(&self, name: &str) -> RepoResult<Vec<Event>>;

    /// Store a recomputed review aggregate
    async fn update_rating(&self, seatgeek_id: i64, summary: &RatingSummary) -> RepoResult<()>;

    /// Delete event by internal ID
    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Review Repository
// ============================================================================

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Review>>;

    /// Reviews for one event, newest first
    async fn find_by_event(&self, event_id: i64) -> RepoResult<Vec<Review>>;

    async fn find_by_event_and_user(&self, event_id: i64, user_id: &str)
        -> RepoResult<Option<Review>>;

    /// Reviews for any of the given events
    async fn find_by_events(&self, event_ids: &[i64]) -> RepoResult<Vec<Review>>;

    /// Create a review. Fails with `AlreadyReviewed` on a duplicate (event, user).
    async fn create(&self, review: &Review) -> RepoResult<()>;

    async fn update(&self, review: &Review) -> RepoResult<()>;

    async fn delete(&self, id: Uuid) -> RepoResult<()>;
}

// ============================================================================
// Concert List Repository
// ============================================================================

#[async_trait]
pub trait ConcertListRepository: Send + Sync {
    async fn contains(&self, user_id: &str, list: ConcertList, event_id: Uuid) -> RepoResult<bool>;

    /// Append an event. Fails with `AlreadyInList` if present.
    async fn add(&self, user_id: &str, list: ConcertList, event_id: Uuid) -> RepoResult<()>;

    /// Remove an event, returning whether it was listed
    async fn remove(&self, user_id: &str, list: ConcertList, event_id: Uuid) -> RepoResult<bool>;

    /// Events in a list, in insertion order
    async fn events(&self, user_id: &str, list: ConcertList) -> RepoResult<Vec<Event>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID, including likes and comments
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>>;

    /// Posts by any of the given authors, newest first
    async fn find_by_authors(&self, user_ids: &[String], limit: i64, offset: i64)
        -> RepoResult<Vec<Post>>;

    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Persist edited content
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Delete a post together with its likes and comments
    async fn delete(&self, id: Uuid) -> RepoResult<()>;

    async fn add_like(&self, post_id: Uuid, user_id: &str) -> RepoResult<()>;

    async fn remove_like(&self, post_id: Uuid, user_id: &str) -> RepoResult<()>;

    async fn count_likes(&self, post_id: Uuid) -> RepoResult<i64>;

    async fn add_comment(&self, comment: &Comment) -> RepoResult<()>;

    async fn delete_comment(&self, comment_id: Uuid) -> RepoResult<()>;
}
