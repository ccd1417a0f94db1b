//! Authentication service
//!
//! Identity is owned by the external provider: this service forwards
//! signup/login/logout, resolves bearer tokens, and lazily creates the local
//! user record the first time an identity needs one.

use setlistd_common::AppError;
use setlistd_core::{AuthSession, DomainError, Identity, User};
use tracing::{info, instrument, warn};

use crate::dto::{AuthResponse, LoginRequest, SessionResponse, SignupRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Highest numeric suffix tried when a username is taken
pub const MAX_USERNAME_SUFFIX: u32 = 99;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an account with the identity provider and its local user
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<AuthResponse> {
        let session = self
            .ctx
            .identity()
            .sign_up(&request.email, &request.password)
            .await?;
        let user = self.ensure_user(&session.identity).await?;

        info!(user_id = %user.id, "User signed up");
        Ok(Self::auth_response(session, &user))
    }

    /// Password login
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let session = self
            .ctx
            .identity()
            .sign_in(&request.email, &request.password)
            .await?
            .ok_or(AppError::InvalidCredentials)?;
        let user = self.ensure_user(&session.identity).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(Self::auth_response(session, &user))
    }

    /// Revoke the session behind `token`
    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> ServiceResult<()> {
        self.ctx.identity().sign_out(token).await?;
        Ok(())
    }

    /// Resolve a bearer token to an identity.
    ///
    /// Any failure, including an unreachable provider, is reported as
    /// "Not authorized, token failed".
    #[instrument(skip_all)]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<Identity> {
        match self.ctx.identity().verify(token).await {
            Ok(Some(identity)) => Ok(identity),
            Ok(None) => Err(AppError::InvalidToken.into()),
            Err(e) => {
                warn!(error = %e, "Token verification failed");
                Err(AppError::InvalidToken.into())
            }
        }
    }

    /// Local user for an identity, creating it on first use
    #[instrument(skip(self), fields(user_id = %identity.id))]
    pub async fn ensure_user(&self, identity: &Identity) -> ServiceResult<User> {
        if let Some(user) = self.ctx.user_repo().find_by_id(&identity.id).await? {
            return Ok(user);
        }

        let base = User::default_username(&identity.email, identity.username.as_deref());
        for attempt in 0..=MAX_USERNAME_SUFFIX {
            let candidate = User::username_candidate(&base, attempt);
            if self
                .ctx
                .user_repo()
                .find_by_username(&candidate)
                .await?
                .is_some()
            {
                continue;
            }

            let user = User::new(identity.id.clone(), identity.email.clone(), candidate);
            match self.ctx.user_repo().create(&user).await {
                Ok(()) => {
                    info!(username = %user.username, "Local user created");
                    return Ok(user);
                }
                Err(DomainError::UsernameTaken(_)) => {
                    // Lost a race: either the name or this very user was just inserted
                    if let Some(existing) = self.ctx.user_repo().find_by_id(&identity.id).await? {
                        return Ok(existing);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(base = %base, "No free username variant");
        Err(ServiceError::conflict(format!(
            "Username {base} and its numbered variants are taken"
        )))
    }

    fn auth_response(session: AuthSession, user: &User) -> AuthResponse {
        AuthResponse {
            session: session.access_token.map(|access_token| SessionResponse {
                access_token,
                refresh_token: session.refresh_token,
                expires_in: session.expires_in,
            }),
            user: UserResponse::from(user),
        }
    }
}
