//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names are
//! camelCase except catalog event data, which keeps the catalog's snake_case.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use setlistd_core::{EventStats, Media, Performer, SocialLinks, Taxonomy, Venue};

// ============================================================================
// Common Response Types
// ============================================================================

/// `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Page-number pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub pages: i64,
}

impl PaginationMeta {
    pub fn new(page: u32, limit: u32, total: i64) -> Self {
        let limit_i64 = i64::from(limit.max(1));
        Self {
            page,
            limit,
            total,
            pages: (total + limit_i64 - 1) / limit_i64,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
}

/// Signup/login result. `session` is null while email confirmation is pending.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub session: Option<SessionResponse>,
    pub user: UserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// Full user record, as seen by its owner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub profile_picture: Option<String>,
    pub banner_image: Option<String>,
    pub bio: String,
    pub location: String,
    pub social_links: SocialLinks,
    pub is_private: bool,
    pub posts_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitUserResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Compact user reference used in lists
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub profile_picture: Option<String>,
    pub bio: String,
}

/// Author reference embedded in posts and comments
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    pub id: String,
    pub username: Option<String>,
    pub profile_picture: Option<String>,
}

/// Profile visible to the owner, followers, or anyone if public
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullProfileResponse {
    pub id: String,
    pub username: String,
    pub profile_picture: Option<String>,
    pub banner_image: Option<String>,
    pub bio: String,
    pub location: String,
    pub social_links: SocialLinks,
    pub is_private: bool,
    pub posts_count: i32,
    pub followers_count: i64,
    pub following_count: i64,
    pub followers: Vec<UserSummary>,
    pub following: Vec<UserSummary>,
    pub attended_concerts: Vec<EventResponse>,
    pub wishlist_concerts: Vec<EventResponse>,
    pub favorite_concerts: Vec<EventResponse>,
    pub created_at: DateTime<Utc>,
}

/// What strangers see of a private profile
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitedProfileResponse {
    pub id: String,
    pub username: String,
    pub profile_picture: Option<String>,
    pub banner_image: Option<String>,
    pub bio: String,
    pub is_private: bool,
    pub followers_count: i64,
    pub following_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    Full(Box<FullProfileResponse>),
    Limited(LimitedProfileResponse),
}

// ============================================================================
// Event Responses
// ============================================================================

/// Event payload. `id` is absent for live catalog results that were not saved.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(rename = "seatgeekId")]
    pub seatgeek_id: i64,
    pub title: String,
    pub datetime_local: NaiveDateTime,
    pub datetime_utc: Option<NaiveDateTime>,
    pub url: Option<String>,
    pub venue: Option<Venue>,
    pub performers: Vec<Performer>,
    pub stats: Option<EventStats>,
    pub taxonomies: Vec<Taxonomy>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "averageRating")]
    pub average_rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: i32,
}

/// Event reference embedded in posts
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    pub id: Uuid,
    #[serde(rename = "seatgeekId")]
    pub seatgeek_id: i64,
    pub title: String,
    pub performers: Vec<Performer>,
    pub venue: Option<Venue>,
    pub datetime_local: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogMeta {
    pub total: Option<i64>,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogSearchResponse {
    pub events: Vec<EventResponse>,
    pub meta: CatalogMeta,
}

#[derive(Debug, Clone, Serialize)]
pub struct SavedEventsResponse {
    pub events: Vec<EventResponse>,
    pub pagination: PaginationMeta,
}

// ============================================================================
// Review Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: Uuid,
    pub event_id: i64,
    pub user_id: String,
    pub username: String,
    pub rating: u8,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRatingResponse {
    pub artist: String,
    /// Null when no review matched
    pub average_rating: Option<f64>,
    pub total_reviews: i64,
    pub event_count: usize,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub user: AuthorSummary,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub user: AuthorSummary,
    pub event: Option<EventSummary>,
    pub content: String,
    pub media: Vec<Media>,
    pub likes: Vec<String>,
    pub likes_count: usize,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub liked: bool,
    pub likes_count: i64,
}

// ============================================================================
// Upload Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePictureResponse {
    pub profile_picture: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerImageResponse {
    pub banner_image: String,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
