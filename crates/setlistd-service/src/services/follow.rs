//! Follow service

use setlistd_core::{DomainError, User};
use tracing::{info, instrument};

use crate::dto::MessageResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::user::UserService;

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, follower), fields(follower_id = %follower.id))]
    pub async fn follow(&self, follower: &User, target_id: &str) -> ServiceResult<MessageResponse> {
        if follower.is_owner(target_id) {
            return Err(DomainError::CannotFollowSelf.into());
        }
        UserService::new(self.ctx).require_user(target_id).await?;

        if self
            .ctx
            .follow_repo()
            .is_following(&follower.id, target_id)
            .await?
        {
            return Err(DomainError::AlreadyFollowing.into());
        }
        self.ctx.follow_repo().follow(&follower.id, target_id).await?;

        info!("User followed");
        Ok(MessageResponse::new("Successfully followed user"))
    }

    /// Unfollow; succeeds even if no follow existed
    #[instrument(skip(self, follower), fields(follower_id = %follower.id))]
    pub async fn unfollow(&self, follower: &User, target_id: &str) -> ServiceResult<MessageResponse> {
        UserService::new(self.ctx).require_user(target_id).await?;

        if self.ctx.follow_repo().unfollow(&follower.id, target_id).await? {
            info!("User unfollowed");
        }
        Ok(MessageResponse::new("Successfully unfollowed user"))
    }
}
