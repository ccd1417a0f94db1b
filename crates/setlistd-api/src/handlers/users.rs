//! User handlers
//!
//! Profiles, the follow graph and concert lists.

use axum::{extract::State, Json};
use setlistd_service::dto::{
    EventResponse, InitUserResponse, MessageResponse, ProfileResponse, UpdateProfileRequest,
    UserResponse, UserSearchParams, UserSummary,
};
use setlistd_service::services::{ConcertListService, FollowService, UserService};
use uuid::Uuid;

use crate::extractors::{
    parse_concert_list, ApiPath, ApiQuery, AuthUser, CurrentUser, OptionalAuthUser, ValidatedJson,
};
use crate::response::ApiResult;
use crate::state::AppState;

/// Create the caller's local profile if it does not exist yet
///
/// POST /api/users/init
pub async fn init_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<InitUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.init(&auth.identity).await?;
    Ok(Json(response))
}

/// Search users by username
///
/// GET /api/users/search?q=
pub async fn search_users(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<UserSearchParams>,
) -> ApiResult<Json<Vec<UserSummary>>> {
    let service = UserService::new(state.service_context());
    let response = service.search(params).await?;
    Ok(Json(response))
}

/// Profile by username; private profiles are limited for strangers
///
/// GET /api/users/{username}
pub async fn get_profile(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    ApiPath(username): ApiPath<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_profile(&username, viewer.user_id()).await?;
    Ok(Json(response))
}

/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_profile(user, request).await?;
    Ok(Json(response))
}

/// POST /api/users/follow/{target_user_id}
pub async fn follow_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(target_user_id): ApiPath<String>,
) -> ApiResult<Json<MessageResponse>> {
    let service = FollowService::new(state.service_context());
    let response = service.follow(&user, &target_user_id).await?;
    Ok(Json(response))
}

/// DELETE /api/users/follow/{target_user_id}
pub async fn unfollow_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(target_user_id): ApiPath<String>,
) -> ApiResult<Json<MessageResponse>> {
    let service = FollowService::new(state.service_context());
    let response = service.unfollow(&user, &target_user_id).await?;
    Ok(Json(response))
}

/// GET /api/users/{user_id}/followers
pub async fn get_followers(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> ApiResult<Json<Vec<UserSummary>>> {
    let service = UserService::new(state.service_context());
    let response = service.followers(&user_id).await?;
    Ok(Json(response))
}

/// GET /api/users/{user_id}/following
pub async fn get_following(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> ApiResult<Json<Vec<UserSummary>>> {
    let service = UserService::new(state.service_context());
    let response = service.following(&user_id).await?;
    Ok(Json(response))
}

/// Add an event to one of the caller's concert lists
///
/// POST /api/users/concerts/{list}/{event_id}
pub async fn add_concert(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath((list, event_id)): ApiPath<(String, Uuid)>,
) -> ApiResult<Json<MessageResponse>> {
    let list = parse_concert_list(&list)?;

    let service = ConcertListService::new(state.service_context());
    let response = service.add(&user, list, event_id).await?;
    Ok(Json(response))
}

/// DELETE /api/users/concerts/{list}/{event_id}
pub async fn remove_concert(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath((list, event_id)): ApiPath<(String, Uuid)>,
) -> ApiResult<Json<MessageResponse>> {
    let list = parse_concert_list(&list)?;

    let service = ConcertListService::new(state.service_context());
    let response = service.remove(&user, list, event_id).await?;
    Ok(Json(response))
}

/// GET /api/users/{user_id}/concerts/{list}
pub async fn get_concerts(
    State(state): State<AppState>,
    ApiPath((user_id, list)): ApiPath<(String, String)>,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let list = parse_concert_list(&list)?;

    let service = ConcertListService::new(state.service_context());
    let response = service.get(&user_id, list).await?;
    Ok(Json(response))
}
