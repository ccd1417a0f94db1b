//! User service
//!
//! Profiles, user search and the follower/following listings.

use setlistd_core::{ConcertList, DomainError, Identity, User, UserProfileUpdate};
use tracing::{info, instrument};

use crate::dto::{
    EventResponse, FullProfileResponse, InitUserResponse, LimitedProfileResponse,
    ProfileResponse, UpdateProfileRequest, UserResponse, UserSearchParams, UserSummary,
};

use super::auth::AuthService;
use super::concert_list::ConcertListService;
use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Shortest accepted search term
pub const MIN_SEARCH_LENGTH: usize = 2;

const SEARCH_LIMIT: i64 = 20;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Make sure the caller has a local profile
    #[instrument(skip(self), fields(user_id = %identity.id))]
    pub async fn init(&self, identity: &Identity) -> ServiceResult<InitUserResponse> {
        let user = AuthService::new(self.ctx).ensure_user(identity).await?;
        Ok(InitUserResponse {
            message: "User initialized".to_string(),
            user: UserResponse::from(user),
        })
    }

    /// Case-insensitive username search
    #[instrument(skip(self))]
    pub async fn search(&self, params: UserSearchParams) -> ServiceResult<Vec<UserSummary>> {
        let query = params.q.unwrap_or_default();
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LENGTH {
            return Err(DomainError::SearchQueryTooShort {
                min: MIN_SEARCH_LENGTH,
            }
            .into());
        }

        let users = self
            .ctx
            .user_repo()
            .search_by_username(query, SEARCH_LIMIT)
            .await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    /// Profile by username. Private profiles show strangers a limited view.
    #[instrument(skip(self))]
    pub async fn get_profile(
        &self,
        username: &str,
        viewer_id: Option<&str>,
    ) -> ServiceResult<ProfileResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", username))?;

        let viewer_follows = match viewer_id {
            Some(viewer) if user.is_private && !user.is_owner(viewer) => {
                self.ctx.follow_repo().is_following(viewer, &user.id).await?
            }
            _ => false,
        };

        let counts = self.ctx.follow_repo().counts(&user.id).await?;
        if !user.is_visible_to(viewer_id, viewer_follows) {
            return Ok(ProfileResponse::Limited(LimitedProfileResponse::new(
                &user,
                counts.followers,
                counts.following,
            )));
        }

        let followers = self.ctx.follow_repo().followers(&user.id).await?;
        let following = self.ctx.follow_repo().following(&user.id).await?;

        let lists = ConcertListService::new(self.ctx);
        let attended = lists.events(&user.id, ConcertList::Attended).await?;
        let wishlist = lists.events(&user.id, ConcertList::Wishlist).await?;
        let favorites = lists.events(&user.id, ConcertList::Favorites).await?;

        Ok(ProfileResponse::Full(Box::new(FullProfileResponse {
            followers_count: counts.followers,
            following_count: counts.following,
            followers: followers.into_iter().map(UserSummary::from).collect(),
            following: following.into_iter().map(UserSummary::from).collect(),
            attended_concerts: attended.iter().map(EventResponse::from).collect(),
            wishlist_concerts: wishlist.iter().map(EventResponse::from).collect(),
            favorite_concerts: favorites.iter().map(EventResponse::from).collect(),
            id: user.id,
            username: user.username,
            profile_picture: user.profile_picture,
            banner_image: user.banner_image,
            bio: user.bio,
            location: user.location,
            social_links: user.social_links,
            is_private: user.is_private,
            posts_count: user.posts_count,
            created_at: user.created_at,
        })))
    }

    /// Change the provided profile fields only
    #[instrument(skip(self, user, request), fields(user_id = %user.id))]
    pub async fn update_profile(
        &self,
        mut user: User,
        request: UpdateProfileRequest,
    ) -> ServiceResult<UserResponse> {
        user.apply_update(UserProfileUpdate {
            bio: request.bio,
            location: request.location,
            social_links: request.social_links,
            is_private: request.is_private,
        })?;

        self.ctx.user_repo().update(&user).await?;

        info!("Profile updated");
        Ok(UserResponse::from(user))
    }

    #[instrument(skip(self))]
    pub async fn followers(&self, user_id: &str) -> ServiceResult<Vec<UserSummary>> {
        self.require_user(user_id).await?;
        let users = self.ctx.follow_repo().followers(user_id).await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn following(&self, user_id: &str) -> ServiceResult<Vec<UserSummary>> {
        self.require_user(user_id).await?;
        let users = self.ctx.follow_repo().following(user_id).await?;
        Ok(users.into_iter().map(UserSummary::from).collect())
    }

    pub(crate) async fn require_user(&self, user_id: &str) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id))
    }
}
