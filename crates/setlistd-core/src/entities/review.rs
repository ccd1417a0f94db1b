//! Review entity - a user's star rating for one event

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::Rating;

/// Review of an event, keyed by the event's catalog id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: Uuid,
    pub event_id: i64,
    pub user_id: String,
    pub username: String,
    pub rating: Rating,
    pub review_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        event_id: i64,
        user_id: String,
        username: String,
        rating: Rating,
        review_text: &str,
    ) -> Result<Self, DomainError> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            username,
            rating,
            review_text: Self::normalize_text(review_text)?,
            created_at: now,
            updated_at: now,
        })
    }

    fn normalize_text(text: &str) -> Result<String, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::ValidationError(
                "Review text is required".to_string(),
            ));
        }
        Ok(text.to_string())
    }

    #[inline]
    pub fn is_author(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }

    /// Change rating and/or text
    pub fn edit(&mut self, rating: Option<Rating>, review_text: Option<&str>) -> Result<(), DomainError> {
        if let Some(text) = review_text {
            self.review_text = Self::normalize_text(text)?;
        }
        if let Some(rating) = rating {
            self.rating = rating;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
