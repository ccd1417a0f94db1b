//! PostgreSQL implementation of ReviewRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use setlistd_core::{DomainError, RepoResult, Review, ReviewRepository};

use crate::models::ReviewModel;

use super::error::{map_db_error, map_unique_violation, review_not_found};

const REVIEW_COLUMNS: &str =
    "id, event_id, user_id, username, rating, review_text, created_at, updated_at";

/// PostgreSQL implementation of ReviewRepository
#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    /// Create a new PgReviewRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_reviews(models: Vec<ReviewModel>) -> RepoResult<Vec<Review>> {
    models.into_iter().map(Review::try_from).collect()
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Review::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_event(&self, event_id: i64) -> RepoResult<Vec<Review>> {
        let results = sqlx::query_as::<_, ReviewModel>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE event_id = $1 ORDER BY created_at DESC"
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_reviews(results)
    }

    #[instrument(skip(self))]
    async fn find_by_event_and_user(
        &self,
        event_id: i64,
        user_id: &str,
    ) -> RepoResult<Option<Review>> {
        let result = sqlx::query_as::<_, ReviewModel>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Review::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_events(&self, event_ids: &[i64]) -> RepoResult<Vec<Review>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, ReviewModel>(&format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews WHERE event_id = ANY($1) ORDER BY created_at DESC"
        ))
        .bind(event_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        into_reviews(results)
    }

    #[instrument(skip(self), fields(review_id = %review.id))]
    async fn create(&self, review: &Review) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reviews (id, event_id, user_id, username, rating, review_text,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(review.id)
        .bind(review.event_id)
        .bind(&review.user_id)
        .bind(&review.username)
        .bind(i16::from(review.rating.value()))
        .bind(&review.review_text)
        .bind(review.created_at)
        .bind(review.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyReviewed))?;

        Ok(())
    }

    #[instrument(skip(self), fields(review_id = %review.id))]
    async fn update(&self, review: &Review) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE reviews
            SET rating = $2, review_text = $3, updated_at = $4
            WHERE id = $1
            ",
        )
        .bind(review.id)
        .bind(i16::from(review.rating.value()))
        .bind(&review.review_text)
        .bind(review.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(review_not_found(review.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(review_not_found(id));
        }

        Ok(())
    }
}
