//! Review handlers
//!
//! Reviews are addressed by the event's catalog id.

use axum::{extract::State, Json};
use setlistd_service::dto::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use setlistd_service::services::ReviewService;
use uuid::Uuid;

use crate::extractors::{ApiPath, CurrentUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// List reviews for an event, newest first
///
/// GET /api/events/{event_id}/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    ApiPath(event_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let response = service.list(event_id).await?;
    Ok(Json(response))
}

/// Review an event
///
/// POST /api/events/{event_id}/reviews
pub async fn create_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath(event_id): ApiPath<i64>,
    ValidatedJson(request): ValidatedJson<CreateReviewRequest>,
) -> ApiResult<Created<Json<ReviewResponse>>> {
    let service = ReviewService::new(state.service_context());
    let response = service.create(event_id, &user, request).await?;
    Ok(Created(Json(response)))
}

/// PUT /api/events/{event_id}/reviews/{review_id}
pub async fn update_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath((event_id, review_id)): ApiPath<(i64, Uuid)>,
    ValidatedJson(request): ValidatedJson<UpdateReviewRequest>,
) -> ApiResult<Json<ReviewResponse>> {
    let service = ReviewService::new(state.service_context());
    let response = service.update(event_id, review_id, &user, request).await?;
    Ok(Json(response))
}

/// DELETE /api/events/{event_id}/reviews/{review_id}
pub async fn delete_review(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiPath((event_id, review_id)): ApiPath<(i64, Uuid)>,
) -> ApiResult<NoContent> {
    let service = ReviewService::new(state.service_context());
    service.delete(event_id, review_id, &user).await?;
    Ok(NoContent)
}
