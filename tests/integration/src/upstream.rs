//! Local stand-in for the third-party services the server calls
//!
//! Serves the Supabase auth and storage endpoints and the SeatGeek
//! `/events` endpoint. Access tokens have the form `tok:{user_id}:{username}`
//! and are accepted without any signature check.

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::Query,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Password the stub treats as wrong on login
pub const WRONG_PASSWORD: &str = "wrong-password";

/// Catalog id range served by the stub `/events` endpoint
pub const CATALOG_IDS: [i64; 2] = [910_001, 910_002];

/// Running upstream stub
pub struct Upstream {
    pub addr: SocketAddr,
    _handle: JoinHandle<()>,
}

impl Upstream {
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, router()).await.ok();
        });

        Ok(Self {
            addr,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Access token the stub will accept for this user
pub fn token_for(user_id: &str, username: &str) -> String {
    format!("tok:{user_id}:{username}")
}

fn router() -> Router {
    Router::new()
        .route("/auth/v1/user", get(current_user))
        .route("/auth/v1/signup", post(signup))
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/logout", post(logout))
        .route("/storage/v1/object/*path", post(store_object))
        .route("/events", get(events))
}

fn user_json(id: &str, username: &str) -> Value {
    json!({
        "id": id,
        "email": format!("{username}@example.com"),
        "user_metadata": { "username": username },
    })
}

fn session_json(email: &str) -> Value {
    let username = email.split('@').next().unwrap_or(email);
    // Derived from the email so signup and login yield the same user
    let id = format!("sb-{}", email.replace(['@', '.'], "-"));
    json!({
        "access_token": token_for(&id, username),
        "refresh_token": "refresh",
        "expires_in": 3600,
        "user": user_json(&id, username),
    })
}

async fn current_user(headers: HeaderMap) -> Response {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    let mut parts = token.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("tok"), Some(id), Some(username)) => Json(user_json(id, username)).into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "msg": "invalid JWT" })),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
struct Credentials {
    email: String,
    password: String,
}

async fn signup(Json(credentials): Json<Credentials>) -> Json<Value> {
    Json(session_json(&credentials.email))
}

async fn token(Json(credentials): Json<Credentials>) -> Response {
    if credentials.password == WRONG_PASSWORD {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error_description": "Invalid login credentials" })),
        )
            .into_response();
    }
    Json(session_json(&credentials.email)).into_response()
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn store_object(body: Bytes) -> Response {
    if body.is_empty() {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(json!({ "Key": "stored" })).into_response()
}

#[derive(Deserialize)]
struct EventsQuery {
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    per_page: Option<u32>,
}

async fn events(Query(query): Query<EventsQuery>) -> Json<Value> {
    let events: Vec<Value> = CATALOG_IDS
        .iter()
        .enumerate()
        .map(|(i, id)| {
            json!({
                "id": id,
                "title": format!("Stub Festival Night {}", i + 1),
                "type": "concert",
                "datetime_local": format!("2031-07-0{}T20:00:00", i + 1),
                "venue": { "name": "The Stub Hall", "city": "Austin" },
                "performers": [{ "name": "The Stubs", "primary": true }],
            })
        })
        .collect();

    Json(json!({
        "events": events,
        "meta": {
            "total": CATALOG_IDS.len(),
            "page": query.page.unwrap_or(1),
            "per_page": query.per_page.unwrap_or(20),
        }
    }))
}
