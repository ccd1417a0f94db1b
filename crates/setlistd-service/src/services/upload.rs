//! Upload service
//!
//! Validates files and pushes them to object storage. Profile and banner
//! URLs are written back onto the user.

use chrono::Utc;
use rand::Rng;
use setlistd_core::{Media, MediaKind, UploadKind, User};
use tracing::{info, instrument};

use crate::dto::{BannerImageResponse, ProfilePictureResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LENGTH: usize = 6;

/// A file received from a multipart form
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Upload service
pub struct UploadService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UploadService<'a> {
    /// Create a new UploadService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, user, file), fields(user_id = %user.id))]
    pub async fn profile_picture(
        &self,
        mut user: User,
        file: Option<FileUpload>,
    ) -> ServiceResult<ProfilePictureResponse> {
        let (url, _) = self.store(&user.id, UploadKind::ProfilePicture, file).await?;

        user.profile_picture = Some(url.clone());
        self.ctx.user_repo().update(&user).await?;

        Ok(ProfilePictureResponse {
            profile_picture: url,
        })
    }

    #[instrument(skip(self, user, file), fields(user_id = %user.id))]
    pub async fn banner(
        &self,
        mut user: User,
        file: Option<FileUpload>,
    ) -> ServiceResult<BannerImageResponse> {
        let (url, _) = self.store(&user.id, UploadKind::Banner, file).await?;

        user.banner_image = Some(url.clone());
        self.ctx.user_repo().update(&user).await?;

        Ok(BannerImageResponse { banner_image: url })
    }

    /// Image or video to attach to a post later
    #[instrument(skip(self, user, file), fields(user_id = %user.id))]
    pub async fn post_media(&self, user: &User, file: Option<FileUpload>) -> ServiceResult<Media> {
        let (url, kind) = self.store(&user.id, UploadKind::PostMedia, file).await?;
        Ok(Media { kind, url })
    }

    async fn store(
        &self,
        user_id: &str,
        kind: UploadKind,
        file: Option<FileUpload>,
    ) -> ServiceResult<(String, MediaKind)> {
        let file = file.ok_or_else(|| ServiceError::validation("No file uploaded"))?;
        let media_kind = kind.validate(&file.content_type, file.bytes.len())?;

        let key = UploadKind::object_key(
            user_id,
            Utc::now().timestamp_millis(),
            &random_suffix(),
            &file.content_type,
        );
        let bucket = self.ctx.buckets().for_kind(kind);
        let size = file.bytes.len();

        let url = self
            .ctx
            .storage()
            .upload(bucket, &key, file.bytes, &file.content_type)
            .await?;

        info!(bucket, key = %key, size, "File uploaded");
        Ok((url, media_kind))
    }
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LENGTH)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}
