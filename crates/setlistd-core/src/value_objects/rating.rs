//! Star ratings and their per-event aggregate

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A 1–5 star rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i32) -> Result<Self, DomainError> {
        if (i32::from(Self::MIN)..=i32::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::InvalidRating(value))
        }
    }

    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i32> for Rating {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        i32::from(rating.0)
    }
}

/// Mean rating and review count, recomputed from the full review set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: i64,
}

impl RatingSummary {
    /// Summary of no reviews: average 0, count 0
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_ratings<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Rating>,
    {
        let (sum, count) = ratings
            .into_iter()
            .fold((0_i64, 0_i64), |(sum, count), r| {
                (sum + i64::from(r.value()), count + 1)
            });

        if count == 0 {
            return Self::empty();
        }

        Self {
            average: sum as f64 / count as f64,
            count,
        }
    }

    /// Average, or `None` when nothing has been rated
    pub fn average_or_none(&self) -> Option<f64> {
        (self.count > 0).then_some(self.average)
    }
}
