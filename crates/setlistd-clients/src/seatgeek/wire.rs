//! SeatGeek JSON payloads

use chrono::NaiveDateTime;
use serde::Deserialize;

use setlistd_core::{EventListing, EventStats, Performer, Taxonomy, Venue};

#[derive(Debug, Deserialize)]
pub(super) struct CatalogResponse {
    #[serde(default)]
    pub events: Vec<serde_json::Value>,
    #[serde(default)]
    pub meta: Option<CatalogMeta>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CatalogMeta {
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// One event as returned by `GET /events`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEvent {
    pub id: i64,
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

impl From<CatalogEvent> for EventListing {
    fn from(event: CatalogEvent) -> Self {
        EventListing {
            seatgeek_id: event.id,
            title: event.title,
            datetime_local: event.datetime_local,
            datetime_utc: event.datetime_utc,
            url: event.url,
            venue: event.venue,
            performers: event.performers,
            stats: event.stats,
            taxonomies: event.taxonomies,
            event_type: event.event_type,
            status: event.status,
        }
    }
}
