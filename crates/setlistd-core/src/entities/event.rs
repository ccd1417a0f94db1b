//! Event entity - a concert cached from the external catalog
//!
//! Venue, performer, stats and taxonomy records keep the catalog's field
//! names so they can be stored and returned without translation.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::RatingSummary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Venue {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub postal_code: Option<String>,
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub id: Option<i64>,
    pub name: String,
    pub slug: Option<String>,
    pub primary: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Performer {
    pub id: Option<i64>,
    pub name: String,
    pub short_name: Option<String>,
    pub url: Option<String>,
    pub image: Option<String>,
    pub genres: Vec<Genre>,
    pub primary: bool,
    #[serde(rename = "type")]
    pub performer_type: Option<String>,
    pub slug: Option<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventStats {
    pub lowest_price: Option<f64>,
    pub highest_price: Option<f64>,
    pub average_price: Option<f64>,
    pub median_price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    pub id: Option<i64>,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// Catalog data for an event, as received from the events API
#[derive(Debug, Clone, PartialEq)]
pub struct EventListing {
    pub seatgeek_id: i64,
    pub title: String,
    pub datetime_local: NaiveDateTime,
    pub datetime_utc: Option<NaiveDateTime>,
    pub url: Option<String>,
    pub venue: Option<Venue>,
    pub performers: Vec<Performer>,
    pub stats: Option<EventStats>,
    pub taxonomies: Vec<Taxonomy>,
    pub event_type: Option<String>,
    pub status: Option<String>,
}

/// A stored event with its review aggregate
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub listing: EventListing,
    pub average_rating: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create a new, unrated Event from catalog data
    pub fn new(listing: EventListing) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            listing,
            average_rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn seatgeek_id(&self) -> i64 {
        self.listing.seatgeek_id
    }

    /// Event starts after `now` (both in the event's local clock)
    pub fn is_upcoming(&self, now: NaiveDateTime) -> bool {
        self.listing.datetime_local > now
    }

    /// Case-insensitive substring match on performer names
    pub fn has_performer(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.listing
            .performers
            .iter()
            .any(|p| p.name.to_lowercase().contains(&needle))
    }

    /// Store a freshly computed review aggregate
    pub fn apply_rating(&mut self, summary: &RatingSummary) {
        self.average_rating = summary.average;
        self.review_count = summary.count as i32;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn listing() -> EventListing {
        EventListing {
            seatgeek_id: 6_100_200,
            title: "Phoebe Bridgers".to_string(),
            datetime_local: NaiveDate::from_ymd_opt(2030, 6, 1)
                .unwrap()
                .and_hms_opt(20, 0, 0)
                .unwrap(),
            datetime_utc: None,
            url: None,
            venue: Some(Venue {
                city: Some("Austin".to_string()),
                ..Default::default()
            }),
            performers: vec![Performer {
                name: "Phoebe Bridgers".to_string(),
                primary: true,
                ..Default::default()
            }],
            stats: None,
            taxonomies: Vec::new(),
            event_type: Some("concert".to_string()),
            status: None,
        }
    }

    #[test]
    fn test_new_event_is_unrated() {
        let event = Event::new(listing());
        assert_eq!(event.seatgeek_id(), 6_100_200);
        assert_eq!(event.review_count, 0);
        assert!(event.average_rating.abs() < f64::EPSILON);
    }

    #[test]
    fn test_is_upcoming() {
        let event = Event::new(listing());
        let start = event.listing.datetime_local;
        assert!(event.is_upcoming(start - Duration::hours(1)));
        assert!(!event.is_upcoming(start));
        assert!(!event.is_upcoming(start + Duration::days(1)));
    }

    #[test]
    fn test_has_performer_is_case_insensitive() {
        let event = Event::new(listing());
        assert!(event.has_performer("phoebe"));
        assert!(event.has_performer("BRIDGERS"));
        assert!(!event.has_performer("boygenius"));
    }

    #[test]
    fn test_apply_rating() {
        let mut event = Event::new(listing());
        event.apply_rating(&RatingSummary {
            average: 4.0,
            count: 2,
        });
        assert_eq!(event.review_count, 2);
        assert!((event.average_rating - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_performer_deserializes_catalog_shape() {
        let json = r#"{"id": 1, "name": "Wilco", "type": "band", "genres": [{"name": "rock"}]}"#;
        let performer: Performer = serde_json::from_str(json).unwrap();
        assert_eq!(performer.performer_type.as_deref(), Some("band"));
        assert_eq!(performer.genres[0].name, "rock");
        assert!(!performer.primary);
    }
}
