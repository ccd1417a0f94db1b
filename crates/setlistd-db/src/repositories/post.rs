//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use setlistd_core::{Comment, Post, PostRepository, RepoResult};

use crate::mappers::{assemble_posts, PostInsert};
use crate::models::{CommentModel, PostLikeModel, PostModel};

use super::error::{comment_not_found, is_foreign_key_violation, map_db_error, post_not_found};

const POST_COLUMNS: &str = "id, user_id, event_id, content, media, created_at, updated_at";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load likes and comments for a batch of posts
    async fn with_children(&self, posts: Vec<PostModel>) -> RepoResult<Vec<Post>> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let likes = sqlx::query_as::<_, PostLikeModel>(
            r"
            SELECT post_id, user_id FROM post_likes
            WHERE post_id = ANY($1)
            ORDER BY created_at
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let comments = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, post_id, user_id, text, created_at FROM post_comments
            WHERE post_id = ANY($1)
            ORDER BY created_at
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(assemble_posts(posts, likes, comments))
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Ok(self.with_children(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_by_authors(
        &self,
        user_ids: &[String],
        limit: i64,
        offset: i64,
    ) -> RepoResult<Vec<Post>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let results = sqlx::query_as::<_, PostModel>(&format!(
            r"
            SELECT {POST_COLUMNS} FROM posts
            WHERE user_id = ANY($1)
            ORDER BY created_at DESC, id
            LIMIT $2 OFFSET $3
            "
        ))
        .bind(user_ids)
        .bind(limit.clamp(1, 100))
        .bind(offset.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        self.with_children(results).await
    }

    #[instrument(skip(self), fields(post_id = %post.id))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        let row = PostInsert::new(post);
        sqlx::query(
            r"
            INSERT INTO posts (id, user_id, event_id, content, media, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(row.id)
        .bind(row.user_id)
        .bind(row.event_id)
        .bind(row.content)
        .bind(row.media)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET content = $2, updated_at = $3
            WHERE id = $1
            ",
        )
        .bind(post.id)
        .bind(&post.content)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        // Likes and comments go with the post via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_like(&self, post_id: Uuid, user_id: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            ",
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                post_not_found(post_id)
            } else {
                map_db_error(e)
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_like(&self, post_id: Uuid, user_id: &str) -> RepoResult<()> {
        sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count_likes(&self, post_id: Uuid) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM post_likes WHERE post_id = $1",
        )
        .bind(post_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(count)
    }

    #[instrument(skip(self), fields(comment_id = %comment.id))]
    async fn add_comment(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO post_comments (id, post_id, user_id, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(comment.id)
        .bind(comment.post_id)
        .bind(&comment.user_id)
        .bind(&comment.text)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                post_not_found(comment.post_id)
            } else {
                map_db_error(e)
            }
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_comment(&self, comment_id: Uuid) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM post_comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(comment_id));
        }

        Ok(())
    }
}
