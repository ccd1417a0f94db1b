//! User entity - a local profile mirroring an identity-provider account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Links to a user's accounts elsewhere
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub instagram: String,
    pub twitter: String,
    pub spotify: String,
}

/// User entity. `id` is the identity provider's user id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub profile_picture: Option<String>,
    pub banner_image: Option<String>,
    pub bio: String,
    pub location: String,
    pub social_links: SocialLinks,
    pub is_private: bool,
    pub posts_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct UserProfileUpdate {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub social_links: Option<SocialLinks>,
    pub is_private: Option<bool>,
}

impl User {
    pub const MAX_BIO_LENGTH: usize = 500;

    /// Create a new User with an empty profile
    pub fn new(id: String, email: String, username: String) -> Self {
        Self {
            id,
            email,
            username,
            profile_picture: None,
            banner_image: None,
            bio: String::new(),
            location: String::new(),
            social_links: SocialLinks::default(),
            is_private: false,
            posts_count: 0,
            created_at: Utc::now(),
        }
    }

    /// Username for a first-time user: provider metadata, else the email local part
    pub fn default_username(email: &str, metadata_username: Option<&str>) -> String {
        match metadata_username.map(str::trim).filter(|u| !u.is_empty()) {
            Some(username) => username.to_string(),
            None => email.split('@').next().unwrap_or(email).to_string(),
        }
    }

    /// Candidate username for the given collision attempt (0 = unchanged)
    pub fn username_candidate(base: &str, attempt: u32) -> String {
        if attempt == 0 {
            base.to_string()
        } else {
            format!("{base}{attempt}")
        }
    }

    #[inline]
    pub fn is_owner(&self, user_id: &str) -> bool {
        self.id == user_id
    }

    /// Whether a viewer may see the full profile
    pub fn is_visible_to(&self, viewer_id: Option<&str>, viewer_follows: bool) -> bool {
        !self.is_private || viewer_follows || viewer_id.is_some_and(|v| self.is_owner(v))
    }

    /// Apply a partial profile update
    pub fn apply_update(&mut self, update: UserProfileUpdate) -> Result<(), DomainError> {
        if let Some(bio) = update.bio {
            if bio.chars().count() > Self::MAX_BIO_LENGTH {
                return Err(DomainError::ContentTooLong {
                    field: "Bio",
                    max: Self::MAX_BIO_LENGTH,
                });
            }
            self.bio = bio;
        }
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(links) = update.social_links {
            self.social_links = links;
        }
        if let Some(is_private) = update.is_private {
            self.is_private = is_private;
        }
        Ok(())
    }
}
