//! PostgreSQL implementation of ConcertListRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use setlistd_core::{ConcertList, ConcertListRepository, DomainError, Event, RepoResult};

use crate::models::EventModel;

use super::error::{
    event_not_found, is_foreign_key_violation, map_db_error, map_unique_violation,
};

/// PostgreSQL implementation of ConcertListRepository
#[derive(Clone)]
pub struct PgConcertListRepository {
    pool: PgPool,
}

impl PgConcertListRepository {
    /// Create a new PgConcertListRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConcertListRepository for PgConcertListRepository {
    #[instrument(skip(self))]
    async fn contains(&self, user_id: &str, list: ConcertList, event_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM user_concerts WHERE user_id = $1 AND list = $2 AND event_id = $3
            )
            ",
        )
        .bind(user_id)
        .bind(list.as_str())
        .bind(event_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn add(&self, user_id: &str, list: ConcertList, event_id: Uuid) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_concerts (user_id, list, event_id)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(user_id)
        .bind(list.as_str())
        .bind(event_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                event_not_found(event_id)
            } else {
                map_unique_violation(e, || DomainError::AlreadyInList(list))
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self, user_id: &str, list: ConcertList, event_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM user_concerts WHERE user_id = $1 AND list = $2 AND event_id = $3
            ",
        )
        .bind(user_id)
        .bind(list.as_str())
        .bind(event_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn events(&self, user_id: &str, list: ConcertList) -> RepoResult<Vec<Event>> {
        let results = sqlx::query_as::<_, EventModel>(
            r"
            SELECT e.id, e.seatgeek_id, e.title, e.datetime_local, e.datetime_utc, e.url,
                   e.venue, e.performers, e.stats, e.taxonomies, e.event_type, e.status,
                   e.average_rating, e.review_count, e.created_at, e.updated_at
            FROM user_concerts uc
            INNER JOIN events e ON e.id = uc.event_id
            WHERE uc.user_id = $1 AND uc.list = $2
            ORDER BY uc.added_at
            ",
        )
        .bind(user_id)
        .bind(list.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Event::from).collect())
    }
}
