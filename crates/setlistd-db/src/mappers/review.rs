//! Review entity <-> model mapper

use setlistd_core::{DomainError, Rating, Review};

use crate::models::ReviewModel;

/// Convert ReviewModel to Review entity; fails if the stored rating is out of range
impl TryFrom<ReviewModel> for Review {
    type Error = DomainError;

    fn try_from(model: ReviewModel) -> Result<Self, Self::Error> {
        Ok(Review {
            id: model.id,
            event_id: model.event_id,
            user_id: model.user_id,
            username: model.username,
            rating: Rating::new(i32::from(model.rating))?,
            review_text: model.review_text,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
