//! Post handlers
//!
//! Every route here needs an authenticated caller with a local profile.

use axum::{extract::State, Json};
use setlistd_service::dto::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, LikeResponse, MessageResponse,
    PostResponse, UpdatePostRequest,
};
use setlistd_service::services::PostService;
use uuid::Uuid;

use crate::extractors::{ApiPath, CurrentUser, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create(&user, request).await?;
    Ok(Created(Json(response)))
}

/// Own posts plus posts from followed users, newest first
///
/// GET /api/posts/feed
pub async fn get_feed(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service
        .feed(&user, pagination.page, pagination.limit)
        .await?;
    Ok(Json(response))
}

/// GET /api/posts/user/{user_id}
pub async fn get_user_posts(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    ApiPath(user_id): ApiPath<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service
        .user_posts(&user_id, pagination.page, pagination.limit)
        .await?;
    Ok(Json(response))
}

/// GET /api/posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    ApiPath(post_id): ApiPath<Uuid>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.get(post_id).await?;
    Ok(Json(response))
}

/// PUT /api/posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(post_id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.update(post_id, &user, request).await?;
    Ok(Json(response))
}

/// DELETE /api/posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(post_id): ApiPath<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.delete(post_id, &user).await?;
    Ok(Json(response))
}

/// Like the post, or remove the caller's like
///
/// POST /api/posts/{post_id}/like
pub async fn toggle_like(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(post_id): ApiPath<Uuid>,
) -> ApiResult<Json<LikeResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.toggle_like(post_id, &user).await?;
    Ok(Json(response))
}

/// POST /api/posts/{post_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(post_id): ApiPath<Uuid>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.add_comment(post_id, &user, request).await?;
    Ok(Created(Json(response)))
}

/// DELETE /api/posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath((post_id, comment_id)): ApiPath<(Uuid, Uuid)>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.delete_comment(post_id, comment_id, &user).await?;
    Ok(Json(response))
}
