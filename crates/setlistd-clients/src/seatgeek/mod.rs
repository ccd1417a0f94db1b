//! SeatGeek events API implementation of EventCatalog

mod wire;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument, warn};

use setlistd_common::SeatGeekConfig;
use setlistd_core::{CatalogPage, CatalogQuery, EventCatalog, EventListing, RepoResult};

use crate::http::{status_error, transport_error};

pub use wire::CatalogEvent;
use wire::CatalogResponse;

const SERVICE: &str = "seatgeek";
const FAILURE: &str = "Failed to fetch events from SeatGeek";

/// Live events catalog client
#[derive(Clone)]
pub struct SeatGeekClient {
    client: Client,
    base_url: String,
    client_id: String,
    client_secret: Option<String>,
}

impl SeatGeekClient {
    pub fn new(client: Client, config: &SeatGeekConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }

    fn events_url(&self) -> String {
        format!("{}/events", self.base_url)
    }

    /// Query string for `/events`; optional filters are sent only when set
    fn params(&self, query: &CatalogQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("q", query.q.clone()),
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
            ("type", query.event_type.clone()),
            ("client_id", self.client_id.clone()),
        ];
        if let Some(secret) = &self.client_secret {
            params.push(("client_secret", secret.clone()));
        }
        if let Some(city) = &query.city {
            params.push(("venue.city", city.clone()));
        }
        if let Some(from) = &query.from_date {
            params.push(("datetime_local.gte", from.clone()));
        }
        if let Some(to) = &query.to_date {
            params.push(("datetime_local.lte", to.clone()));
        }
        params
    }
}

/// Convert raw catalog events, dropping (and logging) any that do not parse
fn parse_events(raw: Vec<serde_json::Value>) -> Vec<EventListing> {
    raw.into_iter()
        .filter_map(|value| match serde_json::from_value::<CatalogEvent>(value) {
            Ok(event) => Some(event.into()),
            Err(e) => {
                warn!(error = %e, "Skipping malformed catalog event");
                None
            }
        })
        .collect()
}

#[async_trait]
impl EventCatalog for SeatGeekClient {
    #[instrument(skip(self), fields(q = %query.q, page = query.page))]
    async fn search(&self, query: &CatalogQuery) -> RepoResult<CatalogPage> {
        let response = self
            .client
            .get(self.events_url())
            .query(&self.params(query))
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, FAILURE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, FAILURE, response).await);
        }

        let body: CatalogResponse = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, FAILURE, e))?;

        let events = parse_events(body.events);
        let meta = body.meta.unwrap_or_default();
        info!(count = events.len(), total = ?meta.total, "Catalog events fetched");

        Ok(CatalogPage {
            events,
            total: meta.total,
            page: meta.page.unwrap_or(query.page),
            per_page: meta.per_page.unwrap_or(query.per_page),
        })
    }
}
