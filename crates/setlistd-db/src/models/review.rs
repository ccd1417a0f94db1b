//! Review database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for reviews table
#[derive(Debug, Clone, FromRow)]
pub struct ReviewModel {
    pub id: Uuid,
    /// Catalog id of the reviewed event
    pub event_id: i64,
    pub user_id: String,
    pub username: String,
    pub rating: i16,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
