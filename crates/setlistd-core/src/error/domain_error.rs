//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::ConcertList;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Review not found: {0}")]
    ReviewNotFound(Uuid),

    #[error("Post not found: {0}")]
    PostNotFound(Uuid),

    #[error("Comment not found: {0}")]
    CommentNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("{field} must be {max} characters or less")]
    ContentTooLong { field: &'static str, max: usize },

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),

    #[error("Search query must be at least {min} characters")]
    SearchQueryTooShort { min: usize },

    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("File too large: max {max_bytes} bytes")]
    FileTooLarge { max_bytes: usize },

    #[error("Too many media attachments: max {max}")]
    TooManyMedia { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    /// `action` is the verb shown to the caller, e.g. "update"
    #[error("You can only {action} your own reviews")]
    NotReviewAuthor { action: &'static str },

    #[error("You can only {action} your own posts")]
    NotPostAuthor { action: &'static str },

    #[error("You can only delete your own comments")]
    NotCommentAuthor,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("You have already reviewed this event")]
    AlreadyReviewed,

    #[error("Already following this user")]
    AlreadyFollowing,

    #[error("Cannot follow yourself")]
    CannotFollowSelf,

    #[error("Concert already in {}", .0.label())]
    AlreadyInList(ConcertList),

    #[error("Cannot add past concerts to wishlist")]
    PastEventForWishlist,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Message is user-facing, e.g. "Failed to fetch events from SeatGeek"
    #[error("{0}")]
    ExternalService(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::ReviewNotFound(_) => "UNKNOWN_REVIEW",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidRating(_) => "INVALID_RATING",
            Self::SearchQueryTooShort { .. } => "SEARCH_QUERY_TOO_SHORT",
            Self::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::TooManyMedia { .. } => "TOO_MANY_MEDIA",

            // Authorization
            Self::NotReviewAuthor { .. } => "NOT_REVIEW_AUTHOR",
            Self::NotPostAuthor { .. } => "NOT_POST_AUTHOR",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameTaken(_) => "USERNAME_TAKEN",

            // Business Rules
            Self::AlreadyReviewed => "ALREADY_REVIEWED",
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",
            Self::CannotFollowSelf => "CANNOT_FOLLOW_SELF",
            Self::AlreadyInList(_) => "ALREADY_IN_LIST",
            Self::PastEventForWishlist => "PAST_EVENT",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::EventNotFound(_)
                | Self::ReviewNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::ContentTooLong { .. }
                | Self::InvalidRating(_)
                | Self::SearchQueryTooShort { .. }
                | Self::UnsupportedMediaType(_)
                | Self::FileTooLarge { .. }
                | Self::TooManyMedia { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotReviewAuthor { .. } | Self::NotPostAuthor { .. } | Self::NotCommentAuthor
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::UsernameTaken(_))
    }

    /// Check if this is a business rule violation (reported as a bad request)
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::AlreadyReviewed
                | Self::AlreadyFollowing
                | Self::CannotFollowSelf
                | Self::AlreadyInList(_)
                | Self::PastEventForWishlist
        )
    }

    /// Check if an external collaborator (identity, storage, catalog) failed
    pub fn is_external(&self) -> bool {
        matches!(self, Self::ExternalService(_))
    }
}
