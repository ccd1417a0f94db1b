//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Names and catalog ids
//! are random so repeated runs against one database do not collide.

use chrono::{Duration, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

/// Random lowercase suffix for test data
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..10].to_string()
}

/// Random catalog id well away from real SeatGeek ids
pub fn unique_catalog_id() -> i64 {
    let bits = Uuid::new_v4().as_u128() as u64 & 0x0000_FFFF_FFFF;
    9_000_000_000 + bits as i64
}

/// An account created through the signup endpoint
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub token: String,
}

/// Signup request
#[derive(Debug, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn unique() -> Self {
        Self {
            email: format!("fan{}@example.com", unique_suffix()),
            password: "TestPass123!".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload for `POST /api/events/save`, `days_from_now` days out
pub fn event_payload(seatgeek_id: i64, performer: &str, days_from_now: i64) -> Value {
    let local = (Utc::now() + Duration::days(days_from_now)).naive_utc();
    json!({
        "id": seatgeek_id,
        "title": format!("{performer} Live"),
        "datetime_local": local.format("%Y-%m-%dT%H:%M:%S").to_string(),
        "type": "concert",
        "venue": { "name": "Test Arena", "city": "Denver" },
        "performers": [{ "name": performer, "primary": true }],
    })
}

/// Review body
pub fn review_payload(rating: i32, text: &str) -> Value {
    json!({ "rating": rating, "reviewText": text })
}

/// Post body
pub fn post_payload(content: &str, event_id: Option<&str>) -> Value {
    json!({ "content": content, "eventId": event_id })
}
