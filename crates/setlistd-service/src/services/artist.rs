//! Artist service - per-performer rating computed at read time

use setlistd_core::RatingSummary;
use tracing::instrument;

use crate::dto::ArtistRatingResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Artist service
pub struct ArtistService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ArtistService<'a> {
    /// Create a new ArtistService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Average of every review on an event featuring `name`
    #[instrument(skip(self))]
    pub async fn rating(&self, name: &str) -> ServiceResult<ArtistRatingResponse> {
        let events = self.ctx.event_repo().find_by_performer(name).await?;
        let event_ids: Vec<i64> = events.iter().map(|e| e.seatgeek_id()).collect();

        let reviews = self.ctx.review_repo().find_by_events(&event_ids).await?;
        let summary = RatingSummary::from_ratings(reviews.iter().map(|r| r.rating));

        Ok(ArtistRatingResponse {
            artist: name.to_string(),
            average_rating: summary.average_or_none(),
            total_reviews: summary.count,
            event_count: events.len(),
        })
    }
}
