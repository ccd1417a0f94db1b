//! Supabase Auth implementation of IdentityProvider

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use setlistd_common::SupabaseConfig;
use setlistd_core::{AuthSession, DomainError, Identity, IdentityProvider, RepoResult};

use crate::http::{is_auth_rejection, provider_message, status_error, transport_error};

const SERVICE: &str = "supabase-auth";
const FAILURE: &str = "Identity provider unavailable";

/// Identity provider backed by the Supabase Auth REST API
#[derive(Clone)]
pub struct SupabaseAuthClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    username: Option<String>,
}

/// Token response. Signup without a session returns the bare user instead.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SessionResponse {
    Session {
        access_token: String,
        #[serde(default)]
        refresh_token: Option<String>,
        #[serde(default)]
        expires_in: Option<i64>,
        user: SupabaseUser,
    },
    UserOnly(SupabaseUser),
}

impl From<SupabaseUser> for Identity {
    fn from(user: SupabaseUser) -> Self {
        Identity {
            id: user.id,
            email: user.email.unwrap_or_default(),
            username: user.user_metadata.username,
        }
    }
}

impl From<SessionResponse> for AuthSession {
    fn from(response: SessionResponse) -> Self {
        match response {
            SessionResponse::Session {
                access_token,
                refresh_token,
                expires_in,
                user,
            } => AuthSession {
                access_token: Some(access_token),
                refresh_token,
                expires_in,
                identity: user.into(),
            },
            SessionResponse::UserOnly(user) => AuthSession {
                access_token: None,
                refresh_token: None,
                expires_in: None,
                identity: user.into(),
            },
        }
    }
}

impl SupabaseAuthClient {
    pub fn new(client: Client, config: &SupabaseConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.public_key().to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }
}

#[async_trait]
impl IdentityProvider for SupabaseAuthClient {
    #[instrument(skip_all)]
    async fn verify(&self, token: &str) -> RepoResult<Option<Identity>> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, FAILURE, e))?;

        let status = response.status();
        if is_auth_rejection(status) {
            debug!(%status, "Token rejected by identity provider");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error(SERVICE, FAILURE, response).await);
        }

        let user: SupabaseUser = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, FAILURE, e))?;
        Ok(Some(user.into()))
    }

    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> RepoResult<AuthSession> {
        let response = self
            .client
            .post(self.endpoint("signup"))
            .header("apikey", &self.api_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, FAILURE, e))?;

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY || status == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            let message = provider_message(&body).unwrap_or_else(|| "Signup rejected".to_string());
            if message.to_lowercase().contains("already registered") {
                return Err(DomainError::EmailAlreadyExists);
            }
            return Err(DomainError::ValidationError(message));
        }
        if !status.is_success() {
            return Err(status_error(SERVICE, FAILURE, response).await);
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, FAILURE, e))?;
        Ok(session.into())
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> RepoResult<Option<AuthSession>> {
        let response = self
            .client
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&Credentials { email, password })
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, FAILURE, e))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || is_auth_rejection(status) {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error(SERVICE, FAILURE, response).await);
        }

        let session: SessionResponse = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, FAILURE, e))?;
        Ok(Some(session.into()))
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, token: &str) -> RepoResult<()> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .bearer_auth(token)
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, FAILURE, e))?;

        // An already-invalid token is as good as logged out
        let status = response.status();
        if status.is_success() || is_auth_rejection(status) {
            Ok(())
        } else {
            Err(status_error(SERVICE, FAILURE, response).await)
        }
    }
}
