//! Entity to model mappers
//!
//! This module provides conversions between domain entities (setlistd-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert`/`*Upsert` structs: Prepare entity data for database operations

mod event;
mod post;
mod review;
mod user;

pub use event::EventUpsert;
pub use post::{assemble_posts, PostInsert};
pub use user::UserUpdate;
