//! User database model

use chrono::{DateTime, Utc};
use setlistd_core::SocialLinks;
use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: String,
    pub email: String,
    pub username: String,
    pub profile_picture: Option<String>,
    pub banner_image: Option<String>,
    pub bio: String,
    pub location: String,
    pub social_links: Json<SocialLinks>,
    pub is_private: bool,
    pub posts_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Follower / following totals for one user
#[derive(Debug, Clone, Copy, FromRow)]
pub struct FollowCountsModel {
    pub followers: i64,
    pub following: i64,
}
