//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use setlistd_core::{DomainError, RepoResult, User, UserRepository};

use crate::mappers::UserUpdate;
use crate::models::UserModel;

use super::error::{contains_pattern, map_constraint_violation, map_db_error, user_not_found};

pub(crate) const USER_COLUMNS: &str = "id, email, username, profile_picture, banner_image, bio, \
     location, social_links, is_private, posts_count, created_at";

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn search_by_username(&self, query: &str, limit: i64) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username ILIKE $1 ORDER BY username LIMIT $2"
        ))
        .bind(contains_pattern(query))
        .bind(limit.clamp(1, 100))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, username, profile_picture, banner_image, bio, location,
                               social_links, is_private, posts_count, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.profile_picture)
        .bind(&user.banner_image)
        .bind(&user.bio)
        .bind(&user.location)
        .bind(sqlx::types::Json(&user.social_links))
        .bind(user.is_private)
        .bind(user.posts_count)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_constraint_violation(e, |constraint| match constraint {
                Some("users_email_key") => DomainError::EmailAlreadyExists,
                _ => DomainError::UsernameTaken(user.username.clone()),
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self), fields(user_id = %user.id))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let update = UserUpdate::new(user);
        let result = sqlx::query(
            r"
            UPDATE users
            SET profile_picture = $2, banner_image = $3, bio = $4, location = $5,
                social_links = $6, is_private = $7
            WHERE id = $1
            ",
        )
        .bind(update.id)
        .bind(update.profile_picture)
        .bind(update.banner_image)
        .bind(update.bio)
        .bind(update.location)
        .bind(update.social_links)
        .bind(update.is_private)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(&user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn adjust_posts_count(&self, id: &str, delta: i32) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET posts_count = GREATEST(posts_count + $2, 0)
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(delta)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }
}
