//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    parse_date_bound, CatalogSearchParams, CreateCommentRequest, CreatePostRequest,
    CreateReviewRequest, LoginRequest, SaveEventRequest, SavedEventsParams, SignupRequest,
    UpdatePostRequest, UpdateProfileRequest, UpdateReviewRequest, UserSearchParams,
};

// Re-export commonly used response types
pub use responses::{
    ArtistRatingResponse, AuthResponse, AuthorSummary, BannerImageResponse, CatalogMeta,
    CatalogSearchResponse, CommentResponse, EventResponse, EventSummary, FullProfileResponse,
    HealthChecks, HealthResponse, InitUserResponse, LikeResponse, LimitedProfileResponse,
    MessageResponse, PaginationMeta, PostResponse, ProfilePictureResponse, ProfileResponse,
    ReadinessResponse, ReviewResponse, SavedEventsResponse, SessionResponse, UserResponse,
    UserSummary,
};
