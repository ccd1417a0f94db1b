//! User entity <-> model mapper

use setlistd_core::{FollowCounts, SocialLinks, User};
use sqlx::types::Json;

use crate::models::{FollowCountsModel, UserModel};

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            email: model.email,
            username: model.username,
            profile_picture: model.profile_picture,
            banner_image: model.banner_image,
            bio: model.bio,
            location: model.location,
            social_links: model.social_links.0,
            is_private: model.is_private,
            posts_count: model.posts_count,
            created_at: model.created_at,
        }
    }
}

impl From<FollowCountsModel> for FollowCounts {
    fn from(model: FollowCountsModel) -> Self {
        FollowCounts {
            followers: model.followers,
            following: model.following,
        }
    }
}

/// Mutable profile columns of a user
pub struct UserUpdate<'a> {
    pub id: &'a str,
    pub profile_picture: Option<&'a str>,
    pub banner_image: Option<&'a str>,
    pub bio: &'a str,
    pub location: &'a str,
    pub social_links: Json<&'a SocialLinks>,
    pub is_private: bool,
}

impl<'a> UserUpdate<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            id: &user.id,
            profile_picture: user.profile_picture.as_deref(),
            banner_image: user.banner_image.as_deref(),
            bio: &user.bio,
            location: &user.location,
            social_links: Json(&user.social_links),
            is_private: user.is_private,
        }
    }
}
