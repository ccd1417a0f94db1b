//! Authentication extractors
//!
//! Bearer tokens are verified against the identity provider on every
//! request; there is no local token cache.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use setlistd_common::AppError;
use setlistd_core::{Identity, User};
use setlistd_service::services::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

/// Caller identity resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub identity: Identity,
    /// Raw bearer token, needed for logout
    pub token: String,
}

impl AuthUser {
    pub fn user_id(&self) -> &str {
        &self.identity.id
    }
}

async fn bearer_token<S>(parts: &mut Parts, state: &S) -> Option<String>
where
    S: Send + Sync,
{
    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts, state)
            .await
            .ok_or(ApiError::App(AppError::MissingAuth))?;

        let app_state = AppState::from_ref(state);
        let identity = AuthService::new(app_state.service_context())
            .authenticate(&token)
            .await?;

        Ok(AuthUser { identity, token })
    }
}

/// Authenticated caller together with their local profile, created on
/// first use
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let app_state = AppState::from_ref(state);
        let user = AuthService::new(app_state.service_context())
            .ensure_user(&auth.identity)
            .await?;

        Ok(CurrentUser(user))
    }
}

/// Optional authenticated user
///
/// A missing or rejected token means an anonymous caller, never an error.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<&str> {
        self.0.as_ref().map(AuthUser::user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts, state).await else {
            return Ok(OptionalAuthUser(None));
        };

        let app_state = AppState::from_ref(state);
        let identity = AuthService::new(app_state.service_context())
            .authenticate(&token)
            .await
            .ok();

        Ok(OptionalAuthUser(
            identity.map(|identity| AuthUser { identity, token }),
        ))
    }
}
