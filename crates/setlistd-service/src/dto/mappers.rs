//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use setlistd_core::{Comment, Event, EventListing, Review, User};

use super::responses::{
    AuthorSummary, CommentResponse, EventResponse, EventSummary, LimitedProfileResponse,
    ReviewResponse, UserResponse, UserSummary,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            profile_picture: user.profile_picture.clone(),
            banner_image: user.banner_image.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            social_links: user.social_links.clone(),
            is_private: user.is_private,
            posts_count: user.posts_count,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            profile_picture: user.profile_picture.clone(),
            bio: user.bio.clone(),
        }
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: Some(user.username.clone()),
            profile_picture: user.profile_picture.clone(),
        }
    }
}

impl AuthorSummary {
    /// Reference to an account with no local profile
    pub fn unknown(id: &str) -> Self {
        Self {
            id: id.to_string(),
            username: None,
            profile_picture: None,
        }
    }
}

impl LimitedProfileResponse {
    pub fn new(user: &User, followers_count: i64, following_count: i64) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            profile_picture: user.profile_picture.clone(),
            banner_image: user.banner_image.clone(),
            bio: user.bio.clone(),
            is_private: true,
            followers_count,
            following_count,
        }
    }
}

// ============================================================================
// Event Mappers
// ============================================================================

impl From<&EventListing> for EventResponse {
    /// Live catalog result: no internal id, no reviews yet
    fn from(listing: &EventListing) -> Self {
        Self {
            id: None,
            seatgeek_id: listing.seatgeek_id,
            title: listing.title.clone(),
            datetime_local: listing.datetime_local,
            datetime_utc: listing.datetime_utc,
            url: listing.url.clone(),
            venue: listing.venue.clone(),
            performers: listing.performers.clone(),
            stats: listing.stats,
            taxonomies: listing.taxonomies.clone(),
            event_type: listing.event_type.clone(),
            status: listing.status.clone(),
            average_rating: 0.0,
            review_count: 0,
        }
    }
}

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: Some(event.id),
            average_rating: event.average_rating,
            review_count: event.review_count,
            ..Self::from(&event.listing)
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self::from(&event)
    }
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            seatgeek_id: event.listing.seatgeek_id,
            title: event.listing.title.clone(),
            performers: event.listing.performers.clone(),
            venue: event.listing.venue.clone(),
            datetime_local: event.listing.datetime_local,
        }
    }
}

// ============================================================================
// Review Mappers
// ============================================================================

impl From<&Review> for ReviewResponse {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            event_id: review.event_id,
            user_id: review.user_id.clone(),
            username: review.username.clone(),
            rating: review.rating.value(),
            review_text: review.review_text.clone(),
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self::from(&review)
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl CommentResponse {
    pub fn new(comment: &Comment, user: AuthorSummary) -> Self {
        Self {
            id: comment.id,
            user,
            text: comment.text.clone(),
            created_at: comment.created_at,
        }
    }
}
