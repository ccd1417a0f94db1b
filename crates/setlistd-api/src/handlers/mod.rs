//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod artists;
pub mod auth;
pub mod events;
pub mod health;
pub mod posts;
pub mod reviews;
pub mod uploads;
pub mod users;
