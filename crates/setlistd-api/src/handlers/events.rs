//! Event handlers
//!
//! Live catalog search and the local cache of saved events.

use axum::{extract::State, Json};
use setlistd_service::dto::{
    CatalogSearchParams, CatalogSearchResponse, EventResponse, SaveEventRequest,
    SavedEventsParams, SavedEventsResponse,
};
use setlistd_service::services::EventService;
use uuid::Uuid;

use crate::extractors::{ApiPath, ApiQuery, AuthUser, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Search the external catalog, optionally caching the results
///
/// GET /api/events
pub async fn search_events(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CatalogSearchParams>,
) -> ApiResult<Json<CatalogSearchResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.search_catalog(params).await?;
    Ok(Json(response))
}

/// Upsert one event by its catalog id
///
/// POST /api/events/save
pub async fn save_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SaveEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.save_event(request).await?;
    Ok(Json(response))
}

/// List cached events
///
/// GET /api/saved-events
pub async fn list_saved_events(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SavedEventsParams>,
) -> ApiResult<Json<SavedEventsResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.list_saved(params).await?;
    Ok(Json(response))
}

/// GET /api/saved-events/{id}
pub async fn get_saved_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.get_saved(id).await?;
    Ok(Json(response))
}

/// DELETE /api/saved-events/{id}
pub async fn delete_saved_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<NoContent> {
    let service = EventService::new(state.service_context());
    service.delete_saved(id).await?;
    Ok(NoContent)
}
