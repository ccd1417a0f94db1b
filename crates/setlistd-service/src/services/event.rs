//! Event service
//!
//! Live catalog search plus the locally saved event cache.

use chrono::NaiveDateTime;
use futures::future::try_join_all;
use setlistd_core::{CatalogQuery, EventListing, EventQuery};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{
    parse_date_bound, CatalogMeta, CatalogSearchParams, CatalogSearchResponse, EventResponse,
    PaginationMeta, SaveEventRequest, SavedEventsParams, SavedEventsResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

const DEFAULT_PAGE_SIZE: u32 = 20;
const MAX_PAGE_SIZE: u32 = 100;

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    /// Create a new EventService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Query the external catalog, optionally caching every result
    #[instrument(skip(self))]
    pub async fn search_catalog(
        &self,
        params: CatalogSearchParams,
    ) -> ServiceResult<CatalogSearchResponse> {
        let save = params.save;
        let query = Self::catalog_query(params);
        let page = self.ctx.catalog().search(&query).await?;

        let events = if save {
            let stored = try_join_all(
                page.events
                    .iter()
                    .map(|listing| self.ctx.event_repo().upsert(listing)),
            )
            .await?;
            info!(count = stored.len(), "Catalog events saved");
            stored.iter().map(EventResponse::from).collect()
        } else {
            page.events.iter().map(EventResponse::from).collect()
        };

        Ok(CatalogSearchResponse {
            events,
            meta: CatalogMeta {
                total: page.total,
                page: page.page,
                per_page: page.per_page,
            },
        })
    }

    /// Upsert one catalog event by its external id
    #[instrument(skip(self, request), fields(seatgeek_id = request.id))]
    pub async fn save_event(&self, request: SaveEventRequest) -> ServiceResult<EventResponse> {
        let listing = EventListing::from(request);
        let event = self.ctx.event_repo().upsert(&listing).await?;

        info!(event_id = %event.id, "Event saved");
        Ok(EventResponse::from(event))
    }

    /// Filtered, paginated listing of saved events
    #[instrument(skip(self))]
    pub async fn list_saved(&self, params: SavedEventsParams) -> ServiceResult<SavedEventsResponse> {
        let page = params.page.unwrap_or(1).max(1);
        let limit = params
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let query = EventQuery {
            text: non_blank(params.q),
            city: non_blank(params.city),
            from: date_bound("from_date", params.from_date, false)?,
            to: date_bound("to_date", params.to_date, true)?,
            limit: i64::from(limit),
            offset: i64::from(page - 1) * i64::from(limit),
        };

        let result = self.ctx.event_repo().search(&query).await?;

        Ok(SavedEventsResponse {
            events: result.events.iter().map(EventResponse::from).collect(),
            pagination: PaginationMeta::new(page, limit, result.total),
        })
    }

    #[instrument(skip(self))]
    pub async fn get_saved(&self, id: Uuid) -> ServiceResult<EventResponse> {
        let event = self
            .ctx
            .event_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Event", id.to_string()))?;

        Ok(EventResponse::from(event))
    }

    #[instrument(skip(self))]
    pub async fn delete_saved(&self, id: Uuid) -> ServiceResult<()> {
        if self.ctx.event_repo().find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found("Event", id.to_string()));
        }

        self.ctx.event_repo().delete(id).await?;

        info!(event_id = %id, "Saved event deleted");
        Ok(())
    }

    fn catalog_query(params: CatalogSearchParams) -> CatalogQuery {
        let defaults = CatalogQuery::default();
        CatalogQuery {
            q: non_blank(params.q).unwrap_or(defaults.q),
            page: params.page.unwrap_or(defaults.page).max(1),
            per_page: params
                .per_page
                .unwrap_or(defaults.per_page)
                .clamp(1, MAX_PAGE_SIZE),
            event_type: non_blank(params.event_type).unwrap_or(defaults.event_type),
            city: non_blank(params.city),
            from_date: non_blank(params.from_date),
            to_date: non_blank(params.to_date),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional date filter; a blank value means no bound
fn date_bound(
    field: &str,
    value: Option<String>,
    upper: bool,
) -> ServiceResult<Option<NaiveDateTime>> {
    non_blank(value)
        .map(|raw| {
            parse_date_bound(&raw, upper)
                .ok_or_else(|| ServiceError::validation(format!("Invalid {field}: {raw}")))
        })
        .transpose()
}
