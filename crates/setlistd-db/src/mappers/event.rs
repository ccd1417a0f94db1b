//! Event entity <-> model mapper

use chrono::NaiveDateTime;
use setlistd_core::{Event, EventListing, EventStats, Performer, Taxonomy, Venue};
use sqlx::types::Json;

use crate::models::EventModel;

/// Convert EventModel to Event entity
impl From<EventModel> for Event {
    fn from(model: EventModel) -> Self {
        Event {
            id: model.id,
            listing: EventListing {
                seatgeek_id: model.seatgeek_id,
                title: model.title,
                datetime_local: model.datetime_local,
                datetime_utc: model.datetime_utc,
                url: model.url,
                venue: model.venue.map(|v| v.0),
                performers: model.performers.0,
                stats: model.stats.map(|s| s.0),
                taxonomies: model.taxonomies.0,
                event_type: model.event_type,
                status: model.status,
            },
            average_rating: model.average_rating,
            review_count: model.review_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Catalog columns written on insert or refresh
pub struct EventUpsert<'a> {
    pub seatgeek_id: i64,
    pub title: &'a str,
    pub datetime_local: NaiveDateTime,
    pub datetime_utc: Option<NaiveDateTime>,
    pub url: Option<&'a str>,
    pub venue: Option<Json<&'a Venue>>,
    pub performers: Json<&'a [Performer]>,
    pub stats: Option<Json<&'a EventStats>>,
    pub taxonomies: Json<&'a [Taxonomy]>,
    pub event_type: Option<&'a str>,
    pub status: Option<&'a str>,
}

impl<'a> EventUpsert<'a> {
    pub fn new(listing: &'a EventListing) -> Self {
        Self {
            seatgeek_id: listing.seatgeek_id,
            title: &listing.title,
            datetime_local: listing.datetime_local,
            datetime_utc: listing.datetime_utc,
            url: listing.url.as_deref(),
            venue: listing.venue.as_ref().map(Json),
            performers: Json(&listing.performers),
            stats: listing.stats.as_ref().map(Json),
            taxonomies: Json(&listing.taxonomies),
            event_type: listing.event_type.as_deref(),
            status: listing.status.as_deref(),
        }
    }
}
