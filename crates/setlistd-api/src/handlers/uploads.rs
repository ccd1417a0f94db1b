//! Upload handlers
//!
//! Multipart file uploads forwarded to object storage.

use axum::{
    extract::{Multipart, State},
    Json,
};
use setlistd_core::{Media, UploadKind};
use setlistd_service::dto::{BannerImageResponse, ProfilePictureResponse};
use setlistd_service::services::UploadService;

use crate::extractors::{read_upload, CurrentUser};
use crate::response::ApiResult;
use crate::state::AppState;

/// POST /api/users/upload-profile-picture
pub async fn upload_profile_picture(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> ApiResult<Json<ProfilePictureResponse>> {
    let file = read_upload(&mut multipart, UploadKind::ProfilePicture).await?;

    let service = UploadService::new(state.service_context());
    let response = service.profile_picture(user, file).await?;
    Ok(Json(response))
}

/// POST /api/users/upload-banner
pub async fn upload_banner(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> ApiResult<Json<BannerImageResponse>> {
    let file = read_upload(&mut multipart, UploadKind::Banner).await?;

    let service = UploadService::new(state.service_context());
    let response = service.banner(user, file).await?;
    Ok(Json(response))
}

/// Store an image or video for a later post
///
/// POST /api/posts/media
pub async fn upload_post_media(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> ApiResult<Json<Media>> {
    let file = read_upload(&mut multipart, UploadKind::PostMedia).await?;

    let service = UploadService::new(state.service_context());
    let response = service.post_media(&user, file).await?;
    Ok(Json(response))
}
