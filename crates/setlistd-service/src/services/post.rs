//! Post service
//!
//! Feed posts with likes and comments. Responses embed author and event
//! summaries, resolved in batches per page.

use std::collections::{HashMap, HashSet};

use futures::future::try_join_all;
use setlistd_core::{Comment, DomainError, Event, Post, User};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    AuthorSummary, CommentResponse, CreateCommentRequest, CreatePostRequest, EventSummary,
    LikeResponse, MessageResponse, PostResponse, UpdatePostRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::user::UserService;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, author, request), fields(user_id = %author.id))]
    pub async fn create(&self, author: &User, request: CreatePostRequest) -> ServiceResult<PostResponse> {
        if let Some(event_id) = request.event_id {
            if self.ctx.event_repo().find_by_id(event_id).await?.is_none() {
                return Err(ServiceError::not_found("Event", event_id.to_string()));
            }
        }

        let post = Post::new(
            author.id.clone(),
            &request.content,
            request.event_id,
            request.media,
        )?;

        self.ctx.post_repo().create(&post).await?;
        self.ctx.user_repo().adjust_posts_count(&author.id, 1).await?;

        info!(post_id = %post.id, "Post created");
        self.to_response(post).await
    }

    /// Posts by the user and everyone they follow, newest first
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn feed(&self, user: &User, page: u32, limit: u32) -> ServiceResult<Vec<PostResponse>> {
        let mut authors = self.ctx.follow_repo().following_ids(&user.id).await?;
        authors.push(user.id.clone());

        let (limit, offset) = page_window(page, limit);
        let posts = self
            .ctx
            .post_repo()
            .find_by_authors(&authors, limit, offset)
            .await?;
        self.to_responses(posts).await
    }

    #[instrument(skip(self))]
    pub async fn user_posts(&self, user_id: &str, page: u32, limit: u32) -> ServiceResult<Vec<PostResponse>> {
        UserService::new(self.ctx).require_user(user_id).await?;

        let (limit, offset) = page_window(page, limit);
        let posts = self
            .ctx
            .post_repo()
            .find_by_authors(&[user_id.to_string()], limit, offset)
            .await?;
        self.to_responses(posts).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, post_id: Uuid) -> ServiceResult<PostResponse> {
        let post = self.find(post_id).await?;
        self.to_response(post).await
    }

    #[instrument(skip(self, user, request), fields(user_id = %user.id))]
    pub async fn update(
        &self,
        post_id: Uuid,
        user: &User,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = self.find(post_id).await?;
        if !post.is_author(&user.id) {
            return Err(DomainError::NotPostAuthor { action: "edit" }.into());
        }

        post.set_content(&request.content)?;
        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post.id, "Post updated");
        self.to_response(post).await
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn delete(&self, post_id: Uuid, user: &User) -> ServiceResult<MessageResponse> {
        let post = self.find(post_id).await?;
        if !post.is_author(&user.id) {
            return Err(DomainError::NotPostAuthor { action: "delete" }.into());
        }

        self.ctx.post_repo().delete(post.id).await?;
        self.ctx.user_repo().adjust_posts_count(&user.id, -1).await?;

        info!(post_id = %post.id, "Post deleted");
        Ok(MessageResponse::new("Post deleted successfully"))
    }

    /// Like if not yet liked, otherwise unlike
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn toggle_like(&self, post_id: Uuid, user: &User) -> ServiceResult<LikeResponse> {
        let post = self.find(post_id).await?;

        let liked = !post.is_liked_by(&user.id);
        if liked {
            self.ctx.post_repo().add_like(post.id, &user.id).await?;
        } else {
            self.ctx.post_repo().remove_like(post.id, &user.id).await?;
        }

        let likes_count = self.ctx.post_repo().count_likes(post.id).await?;
        Ok(LikeResponse { liked, likes_count })
    }

    #[instrument(skip(self, user, request), fields(user_id = %user.id))]
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        user: &User,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let post = self.find(post_id).await?;
        let comment = Comment::new(post.id, user.id.clone(), &request.text)?;

        self.ctx.post_repo().add_comment(&comment).await?;

        info!(post_id = %post.id, comment_id = %comment.id, "Comment added");
        Ok(CommentResponse::new(&comment, AuthorSummary::from(user)))
    }

    /// Comment author or post author only
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        user: &User,
    ) -> ServiceResult<MessageResponse> {
        let post = self.find(post_id).await?;
        let comment = post
            .find_comment(comment_id)
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        if !post.can_delete_comment(comment, &user.id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        self.ctx.post_repo().delete_comment(comment.id).await?;

        info!(post_id = %post.id, comment_id = %comment_id, "Comment deleted");
        Ok(MessageResponse::new("Comment deleted successfully"))
    }

    async fn find(&self, post_id: Uuid) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id.to_string()))
    }

    async fn to_response(&self, post: Post) -> ServiceResult<PostResponse> {
        let mut responses = self.to_responses(vec![post]).await?;
        responses
            .pop()
            .ok_or_else(|| ServiceError::internal("post response missing"))
    }

    async fn to_responses(&self, posts: Vec<Post>) -> ServiceResult<Vec<PostResponse>> {
        let user_ids: HashSet<&str> = posts
            .iter()
            .flat_map(|p| {
                std::iter::once(p.user_id.as_str())
                    .chain(p.comments.iter().map(|c| c.user_id.as_str()))
            })
            .collect();
        let event_ids: HashSet<Uuid> = posts.iter().filter_map(|p| p.event_id).collect();

        let users = try_join_all(user_ids.iter().map(|id| self.ctx.user_repo().find_by_id(id))).await?;
        let events =
            try_join_all(event_ids.iter().map(|id| self.ctx.event_repo().find_by_id(*id))).await?;

        let users: HashMap<String, User> = users
            .into_iter()
            .flatten()
            .map(|u| (u.id.clone(), u))
            .collect();
        let events: HashMap<Uuid, Event> = events.into_iter().flatten().map(|e| (e.id, e)).collect();

        let author = |id: &str| {
            users
                .get(id)
                .map_or_else(|| AuthorSummary::unknown(id), AuthorSummary::from)
        };

        Ok(posts
            .into_iter()
            .map(|post| PostResponse {
                id: post.id,
                user: author(&post.user_id),
                event: post
                    .event_id
                    .and_then(|id| events.get(&id))
                    .map(EventSummary::from),
                likes_count: post.likes_count(),
                comments: post
                    .comments
                    .iter()
                    .map(|c| CommentResponse::new(c, author(&c.user_id)))
                    .collect(),
                content: post.content,
                media: post.media,
                likes: post.likes,
                created_at: post.created_at,
                updated_at: post.updated_at,
            })
            .collect())
    }
}

fn page_window(page: u32, limit: u32) -> (i64, i64) {
    let limit = i64::from(limit.max(1));
    (limit, i64::from(page.max(1) - 1) * limit)
}
