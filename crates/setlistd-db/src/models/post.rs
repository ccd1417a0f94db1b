//! Post, like and comment database models

use chrono::{DateTime, Utc};
use setlistd_core::Media;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: Uuid,
    pub user_id: String,
    pub event_id: Option<Uuid>,
    pub content: String,
    pub media: Json<Vec<Media>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for post_likes table
#[derive(Debug, Clone, FromRow)]
pub struct PostLikeModel {
    pub post_id: Uuid,
    pub user_id: String,
}

/// Database model for post_comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
