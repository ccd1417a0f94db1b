//! Event database model

use chrono::{DateTime, NaiveDateTime, Utc};
use setlistd_core::{EventStats, Performer, Taxonomy, Venue};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for events table
#[derive(Debug, Clone, FromRow)]
pub struct EventModel {
    pub id: Uuid,
    pub seatgeek_id: i64,
    pub title: String,
    pub datetime_local: NaiveDateTime,
    pub datetime_utc: Option<NaiveDateTime>,
    pub url: Option<String>,
    pub venue: Option<Json<Venue>>,
    pub performers: Json<Vec<Performer>>,
    pub stats: Option<Json<EventStats>>,
    pub taxonomies: Json<Vec<Taxonomy>>,
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub average_rating: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
