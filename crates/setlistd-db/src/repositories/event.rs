//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use setlistd_core::{
    Event, EventListing, EventPage, EventQuery, EventRepository, RatingSummary, RepoResult,
};

use crate::mappers::EventUpsert;
use crate::models::EventModel;

use super::error::{contains_pattern, event_not_found, map_db_error};

pub(crate) const EVENT_COLUMNS: &str = "id, seatgeek_id, title, datetime_local, datetime_utc, url, \
     venue, performers, stats, taxonomies, event_type, status, average_rating, review_count, \
     created_at, updated_at";

/// Shared filter for search and its count. All parameters are nullable.
const SEARCH_FILTER: &str = r"
    WHERE ($1::TEXT IS NULL
           OR title ILIKE $1
           OR EXISTS (SELECT 1 FROM jsonb_array_elements(performers) p WHERE p ->> 'name' ILIKE $1))
      AND ($2::TEXT IS NULL OR lower(venue ->> 'city') = lower($2))
      AND ($3::TIMESTAMP IS NULL OR datetime_local >= $3)
      AND ($4::TIMESTAMP IS NULL OR datetime_local <= $4)
";

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self))]
    async fn find_by_seatgeek_id(&self, seatgeek_id: i64) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE seatgeek_id = $1"
        ))
        .bind(seatgeek_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self, listing), fields(seatgeek_id = listing.seatgeek_id))]
    async fn upsert(&self, listing: &EventListing) -> RepoResult<Event> {
        let row = EventUpsert::new(listing);
        let result = sqlx::query_as::<_, EventModel>(&format!(
            r"
            INSERT INTO events (id, seatgeek_id, title, datetime_local, datetime_utc, url, venue,
                                performers, stats, taxonomies, event_type, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (seatgeek_id) DO UPDATE
            SET title = EXCLUDED.title,
                datetime_local = EXCLUDED.datetime_local,
                datetime_utc = EXCLUDED.datetime_utc,
                url = EXCLUDED.url,
                venue = EXCLUDED.venue,
                performers = EXCLUDED.performers,
                stats = EXCLUDED.stats,
                taxonomies = EXCLUDED.taxonomies,
                event_type = EXCLUDED.event_type,
                status = EXCLUDED.status,
                updated_at = NOW()
            RETURNING {EVENT_COLUMNS}
            "
        ))
        .bind(Uuid::new_v4())
        .bind(row.seatgeek_id)
        .bind(row.title)
        .bind(row.datetime_local)
        .bind(row.datetime_utc)
        .bind(row.url)
        .bind(row.venue)
        .bind(row.performers)
        .bind(row.stats)
        .bind(row.taxonomies)
        .bind(row.event_type)
        .bind(row.status)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Event::from(result))
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &EventQuery) -> RepoResult<EventPage> {
        let text = query.text.as_deref().map(contains_pattern);

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM events {SEARCH_FILTER}"
        ))
        .bind(&text)
        .bind(&query.city)
        .bind(query.from)
        .bind(query.to)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let results = sqlx::query_as::<_, EventModel>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events {SEARCH_FILTER} \
             ORDER BY datetime_local ASC, id LIMIT $5 OFFSET $6"
        ))
        .bind(&text)
        .bind(&query.city)
        .bind(query.from)
        .bind(query.to)
        .bind(query.limit.clamp(1, 100))
        .bind(query.offset.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(EventPage {
            events: results.into_iter().map(Event::from).collect(),
            total,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_performer(&self, name: &str) -> RepoResult<Vec<Event>> {
        let results = sqlx::query_as::<_, EventModel>(&format!(
            r"
            SELECT {EVENT_COLUMNS} FROM events
            WHERE EXISTS (
                SELECT 1 FROM jsonb_array_elements(performers) p WHERE p ->> 'name' ILIKE $1
            )
            ORDER BY datetime_local
            "
        ))
        .bind(contains_pattern(name))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self))]
    async fn update_rating(&self, seatgeek_id: i64, summary: &RatingSummary) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE events
            SET average_rating = $2, review_count = $3, updated_at = NOW()
            WHERE seatgeek_id = $1
            ",
        )
        .bind(seatgeek_id)
        .bind(summary.average)
        .bind(i32::try_from(summary.count).unwrap_or(i32::MAX))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(event_not_found(seatgeek_id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(event_not_found(id));
        }

        Ok(())
    }
}
