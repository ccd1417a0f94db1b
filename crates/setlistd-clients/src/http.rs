//! Shared HTTP client construction and error mapping

use reqwest::{Client, Response, StatusCode};
use setlistd_common::HttpClientConfig;
use setlistd_core::DomainError;
use tracing::warn;

/// Build the shared client with the configured request timeout
pub fn build_http_client(config: &HttpClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.timeout())
        .user_agent(concat!("setlistd/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Log a transport failure and turn it into a user-facing external error
pub(crate) fn transport_error(
    service: &'static str,
    message: &str,
    e: reqwest::Error,
) -> DomainError {
    warn!(service, error = %e, "Outbound request failed");
    DomainError::ExternalService(message.to_string())
}

/// Log an unexpected status together with the body text
pub(crate) async fn status_error(
    service: &'static str,
    message: &str,
    response: Response,
) -> DomainError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    warn!(service, %status, body = %truncate(&body, 512), "Unexpected response status");
    DomainError::ExternalService(message.to_string())
}

/// Provider message from an error body (`msg`, `error_description` or `message`)
pub(crate) fn provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "error_description", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

pub(crate) fn is_auth_rejection(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
