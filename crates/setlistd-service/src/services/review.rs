//! Review service
//!
//! Reviews are keyed by the event's catalog id. Every write recomputes the
//! event's rating aggregate from the full review set; the review write and
//! the aggregate write are separate statements.

use setlistd_core::{DomainError, Rating, RatingSummary, Review, User};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::dto::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Review service
pub struct ReviewService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReviewService<'a> {
    /// Create a new ReviewService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Review an event once
    #[instrument(skip(self, author, request), fields(user_id = %author.id))]
    pub async fn create(
        &self,
        seatgeek_id: i64,
        author: &User,
        request: CreateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        if self
            .ctx
            .event_repo()
            .find_by_seatgeek_id(seatgeek_id)
            .await?
            .is_none()
        {
            return Err(ServiceError::not_found("Event", seatgeek_id.to_string()));
        }

        let rating = Rating::new(request.rating)?;
        let review = Review::new(
            seatgeek_id,
            author.id.clone(),
            author.username.clone(),
            rating,
            &request.review_text,
        )?;

        if self
            .ctx
            .review_repo()
            .find_by_event_and_user(seatgeek_id, &author.id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyReviewed.into());
        }

        self.ctx.review_repo().create(&review).await?;
        self.recompute(seatgeek_id).await?;

        info!(review_id = %review.id, rating = rating.value(), "Review created");
        Ok(ReviewResponse::from(review))
    }

    /// Reviews for an event, newest first
    #[instrument(skip(self))]
    pub async fn list(&self, seatgeek_id: i64) -> ServiceResult<Vec<ReviewResponse>> {
        let reviews = self.ctx.review_repo().find_by_event(seatgeek_id).await?;
        Ok(reviews.into_iter().map(ReviewResponse::from).collect())
    }

    #[instrument(skip(self, author, request), fields(user_id = %author.id))]
    pub async fn update(
        &self,
        seatgeek_id: i64,
        review_id: Uuid,
        author: &User,
        request: UpdateReviewRequest,
    ) -> ServiceResult<ReviewResponse> {
        let mut review = self.find_for_event(seatgeek_id, review_id).await?;
        if !review.is_author(&author.id) {
            return Err(DomainError::NotReviewAuthor { action: "update" }.into());
        }

        let rating = request.rating.map(Rating::new).transpose()?;
        review.edit(rating, request.review_text.as_deref())?;

        self.ctx.review_repo().update(&review).await?;
        self.recompute(seatgeek_id).await?;

        info!(review_id = %review.id, "Review updated");
        Ok(ReviewResponse::from(review))
    }

    #[instrument(skip(self, author), fields(user_id = %author.id))]
    pub async fn delete(&self, seatgeek_id: i64, review_id: Uuid, author: &User) -> ServiceResult<()> {
        let review = self.find_for_event(seatgeek_id, review_id).await?;
        if !review.is_author(&author.id) {
            return Err(DomainError::NotReviewAuthor { action: "delete" }.into());
        }

        self.ctx.review_repo().delete(review.id).await?;
        self.recompute(seatgeek_id).await?;

        info!(review_id = %review.id, "Review deleted");
        Ok(())
    }

    /// Rewrite the event's aggregate from all of its reviews
    ///
    /// Reviews outlive their saved event; with no event row there is no
    /// aggregate to write.
    #[instrument(skip(self))]
    pub async fn recompute(&self, seatgeek_id: i64) -> ServiceResult<RatingSummary> {
        let reviews = self.ctx.review_repo().find_by_event(seatgeek_id).await?;
        let summary = RatingSummary::from_ratings(reviews.iter().map(|r| r.rating));

        match self
            .ctx
            .event_repo()
            .update_rating(seatgeek_id, &summary)
            .await
        {
            Ok(()) => {}
            Err(DomainError::EventNotFound(_)) => {
                debug!(seatgeek_id, "No saved event, aggregate not written");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(summary)
    }

    async fn find_for_event(&self, seatgeek_id: i64, review_id: Uuid) -> ServiceResult<Review> {
        self.ctx
            .review_repo()
            .find_by_id(review_id)
            .await?
            .filter(|r| r.event_id == seatgeek_id)
            .ok_or_else(|| ServiceError::not_found("Review", review_id.to_string()))
    }
}
