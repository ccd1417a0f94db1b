//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use setlistd_core::ConcertList;

use crate::response::ApiError;

/// `Path` whose rejection is rendered as an API error
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        Ok(ApiPath(inner))
    }
}

/// Parse the `:list` segment of concert list routes
pub fn parse_concert_list(raw: &str) -> Result<ConcertList, ApiError> {
    raw.parse()
        .map_err(|e: setlistd_core::ConcertListParseError| ApiError::invalid_path(e.to_string()))
}
