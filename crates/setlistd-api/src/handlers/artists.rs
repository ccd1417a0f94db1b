//! Artist handlers

use axum::{extract::State, Json};
use setlistd_service::dto::ArtistRatingResponse;
use setlistd_service::services::ArtistService;

use crate::extractors::ApiPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// Average rating across every cached event featuring the artist
///
/// GET /api/artists/{artist_name}/rating
pub async fn artist_rating(
    State(state): State<AppState>,
    ApiPath(artist_name): ApiPath<String>,
) -> ApiResult<Json<ArtistRatingResponse>> {
    let service = ArtistService::new(state.service_context());
    let response = service.rating(&artist_name).await?;
    Ok(Json(response))
}
