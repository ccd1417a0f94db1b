//! Post entity - a social feed update with likes and comments

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::Media;

/// Comment on a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub const MAX_TEXT_LENGTH: usize = 500;

    pub fn new(post_id: Uuid, user_id: String, text: &str) -> Result<Self, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::ValidationError(
                "Comment text is required".to_string(),
            ));
        }
        if text.chars().count() > Self::MAX_TEXT_LENGTH {
            return Err(DomainError::ContentTooLong {
                field: "Comment text",
                max: Self::MAX_TEXT_LENGTH,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            text: text.to_string(),
            created_at: Utc::now(),
        })
    }
}

/// Post entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub user_id: String,
    pub event_id: Option<Uuid>,
    pub content: String,
    pub media: Vec<Media>,
    /// Ids of users who liked the post
    pub likes: Vec<String>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub const MAX_CONTENT_LENGTH: usize = 1000;
    pub const MAX_MEDIA: usize = 4;

    /// Trim and validate post content
    pub fn normalize_content(raw: &str) -> Result<String, DomainError> {
        let content = raw.trim();
        if content.is_empty() {
            return Err(DomainError::ValidationError(
                "Post content is required".to_string(),
            ));
        }
        if content.chars().count() > Self::MAX_CONTENT_LENGTH {
            return Err(DomainError::ContentTooLong {
                field: "Post content",
                max: Self::MAX_CONTENT_LENGTH,
            });
        }
        Ok(content.to_string())
    }

    pub fn new(
        user_id: String,
        content: &str,
        event_id: Option<Uuid>,
        media: Vec<Media>,
    ) -> Result<Self, DomainError> {
        let content = Self::normalize_content(content)?;
        if media.len() > Self::MAX_MEDIA {
            return Err(DomainError::TooManyMedia {
                max: Self::MAX_MEDIA,
            });
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            user_id,
            event_id,
            content,
            media,
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    #[inline]
    pub fn is_author(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    pub fn set_content(&mut self, raw: &str) -> Result<(), DomainError> {
        self.content = Self::normalize_content(raw)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }

    pub fn likes_count(&self) -> usize {
        self.likes.len()
    }

    pub fn find_comment(&self, comment_id: Uuid) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }

    /// A comment can be removed by its author or by the post's author
    pub fn can_delete_comment(&self, comment: &Comment, user_id: &str) -> bool {
        comment.user_id == user_id || self.is_author(user_id)
    }
}
