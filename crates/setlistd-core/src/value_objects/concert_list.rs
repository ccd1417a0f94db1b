//! Concert list kinds a user can collect events into

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the three per-user event collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcertList {
    Attended,
    Wishlist,
    Favorites,
}

/// Error returned when a path segment names no known list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown concert list: {0}")]
pub struct ConcertListParseError(pub String);

impl ConcertList {
    pub const ALL: [Self; 3] = [Self::Attended, Self::Wishlist, Self::Favorites];

    /// Storage and URL representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attended => "attended",
            Self::Wishlist => "wishlist",
            Self::Favorites => "favorites",
        }
    }

    /// Human readable name used in messages
    pub fn label(self) -> &'static str {
        match self {
            Self::Attended => "attended list",
            Self::Wishlist => "wishlist",
            Self::Favorites => "favorites",
        }
    }

    /// Only upcoming events may be added to this list
    #[inline]
    pub fn requires_upcoming(self) -> bool {
        matches!(self, Self::Wishlist)
    }
}

impl fmt::Display for ConcertList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcertList {
    type Err = ConcertListParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "attended" => Ok(Self::Attended),
            "wishlist" => Ok(Self::Wishlist),
            "favorites" => Ok(Self::Favorites),
            other => Err(ConcertListParseError(other.to_string())),
        }
    }
}
