//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`; query strings only `Deserialize`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use setlistd_core::{EventListing, EventStats, Media, Performer, SocialLinks, Taxonomy, Venue};

// ============================================================================
// Auth Requests
// ============================================================================

/// Signup request, forwarded to the identity provider
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,
}

/// Password login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Event Requests
// ============================================================================

/// `GET /api/events` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSearchParams {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub city: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    #[serde(default)]
    pub save: bool,
}

/// `GET /api/saved-events` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedEventsParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub q: Option<String>,
    pub city: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

/// One catalog event to store, in the catalog's own shape
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveEventRequest {
    #[serde(alias = "seatgeekId", alias = "seatgeek_id")]
    pub id: i64,

    #[validate(length(min = 1, message = "Event title is required"))]
    pub title: String,

    pub datetime_local: NaiveDateTime,
    #[serde(default)]
    pub datetime_utc: Option<NaiveDateTime>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub venue: Option<Venue>,
    #[serde(default)]
    pub performers: Vec<Performer>,
    #[serde(default)]
    pub stats: Option<EventStats>,
    #[serde(default)]
    pub taxonomies: Vec<Taxonomy>,
    #[serde(default, rename = "type")]
    pub event_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<SaveEventRequest> for EventListing {
    fn from(req: SaveEventRequest) -> Self {
        EventListing {
            seatgeek_id: req.id,
            title: req.title,
            datetime_local: req.datetime_local,
            datetime_utc: req.datetime_utc,
            url: req.url,
            venue: req.venue,
            performers: req.performers,
            stats: req.stats,
            taxonomies: req.taxonomies,
            event_type: req.event_type,
            status: req.status,
        }
    }
}

/// Parse a date filter given as `YYYY-MM-DD` or a full local timestamp.
/// A bare date used as an upper bound covers the whole day.
pub fn parse_date_bound(raw: &str, upper: bool) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = raw.parse::<NaiveDateTime>() {
        return Some(dt);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let time = if upper {
        NaiveTime::from_hms_opt(23, 59, 59)?
    } else {
        NaiveTime::MIN
    };
    Some(date.and_time(time))
}

// ============================================================================
// Review Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,

    #[validate(length(min = 1, message = "Review text is required"))]
    pub review_text: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i32>,

    pub review_text: Option<String>,
}

// ============================================================================
// User Requests
// ============================================================================

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(max = 500, message = "Bio must be 500 characters or less"))]
    pub bio: Option<String>,

    pub location: Option<String>,

    pub social_links: Option<SocialLinks>,

    pub is_private: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserSearchParams {
    pub q: Option<String>,
}

// ============================================================================
// Post Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: String,

    #[serde(default)]
    pub event_id: Option<Uuid>,

    #[serde(default)]
    #[validate(length(max = 4, message = "A post can have at most 4 media items"))]
    pub media: Vec<Media>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub text: String,
}
