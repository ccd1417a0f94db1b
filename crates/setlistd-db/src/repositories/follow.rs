//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use setlistd_core::{DomainError, FollowCounts, FollowRepository, RepoResult, User};

use crate::models::{FollowCountsModel, UserModel};

use super::error::{is_foreign_key_violation, map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    /// Create a new PgFollowRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn is_following(&self, follower_id: &str, followee_id: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND followee_id = $2)
            ",
        )
        .bind(follower_id)
        .bind(followee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn follow(&self, follower_id: &str, followee_id: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO follows (follower_id, followee_id)
            VALUES ($1, $2)
            ",
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                user_not_found(followee_id)
            } else {
                map_unique_violation(e, || DomainError::AlreadyFollowing)
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unfollow(&self, follower_id: &str, followee_id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2
            ",
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn followers(&self, user_id: &str) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.email, u.username, u.profile_picture, u.banner_image, u.bio,
                   u.location, u.social_links, u.is_private, u.posts_count, u.created_at
            FROM follows f
            INNER JOIN users u ON u.id = f.follower_id
            WHERE f.followee_id = $1
            ORDER BY f.created_at
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn following(&self, user_id: &str) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.email, u.username, u.profile_picture, u.banner_image, u.bio,
                   u.location, u.social_links, u.is_private, u.posts_count, u.created_at
            FROM follows f
            INNER JOIN users u ON u.id = f.followee_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn following_ids(&self, user_id: &str) -> RepoResult<Vec<String>> {
        let results = sqlx::query_scalar::<_, String>(
            r"
            SELECT followee_id FROM follows WHERE follower_id = $1 ORDER BY created_at
            ",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results)
    }

    #[instrument(skip(self))]
    async fn counts(&self, user_id: &str) -> RepoResult<FollowCounts> {
        let result = sqlx::query_as::<_, FollowCountsModel>(
            r"
            SELECT
                (SELECT COUNT(*) FROM follows WHERE followee_id = $1) AS followers,
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1) AS following
            ",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(FollowCounts::from(result))
    }
}
