//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, paths, queries and
//! pagination.

mod auth;
mod multipart;
mod pagination;
mod path;
mod query;
mod validated;

pub use auth::{AuthUser, CurrentUser, OptionalAuthUser};
pub use multipart::read_upload;
pub use pagination::{Pagination, PaginationParams};
pub use path::{parse_concert_list, ApiPath};
pub use query::ApiQuery;
pub use validated::ValidatedJson;
