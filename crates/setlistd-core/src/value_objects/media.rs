//! Media attachments and upload policies

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/gif"];
const VIDEO_TYPES: &[&str] = &["video/mp4", "video/quicktime", "video/x-msvideo"];

/// Kind of an externally hosted media file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a MIME type, `None` for anything not accepted anywhere
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if IMAGE_TYPES.contains(&content_type) {
            Some(Self::Image)
        } else if VIDEO_TYPES.contains(&content_type) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

/// A media attachment on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
}

/// What a file is being uploaded for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ProfilePicture,
    Banner,
    PostMedia,
}

impl UploadKind {
    const IMAGE_MAX_BYTES: usize = 5 * 1024 * 1024;
    const MEDIA_MAX_BYTES: usize = 50 * 1024 * 1024;

    /// Multipart form field carrying the file
    pub fn field_name(self) -> &'static str {
        match self {
            Self::ProfilePicture => "profilePicture",
            Self::Banner => "bannerImage",
            Self::PostMedia => "media",
        }
    }

    pub fn max_bytes(self) -> usize {
        match self {
            Self::ProfilePicture | Self::Banner => Self::IMAGE_MAX_BYTES,
            Self::PostMedia => Self::MEDIA_MAX_BYTES,
        }
    }

    fn accepts(self, kind: MediaKind) -> bool {
        match self {
            Self::ProfilePicture | Self::Banner => kind == MediaKind::Image,
            Self::PostMedia => true,
        }
    }

    /// Check type and size of an incoming file
    pub fn validate(self, content_type: &str, len: usize) -> Result<MediaKind, DomainError> {
        let kind = MediaKind::from_content_type(content_type)
            .filter(|kind| self.accepts(*kind))
            .ok_or_else(|| DomainError::UnsupportedMediaType(content_type.to_string()))?;

        if len > self.max_bytes() {
            return Err(DomainError::FileTooLarge {
                max_bytes: self.max_bytes(),
            });
        }

        Ok(kind)
    }

    /// Object key `{user_id}/{millis}-{suffix}.{subtype}`
    pub fn object_key(user_id: &str, millis: i64, suffix: &str, content_type: &str) -> String {
        let extension = content_type.split('/').nth(1).unwrap_or("bin");
        format!("{user_id}/{millis}-{suffix}.{extension}")
    }
}
