//! Error handling utilities for repositories

use setlistd_core::DomainError;
use sqlx::Error as SqlxError;
use uuid::Uuid;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Like [`map_unique_violation`], but hands the violated constraint name to the callback
pub fn map_constraint_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// True when the statement referenced a row that does not exist
pub fn is_foreign_key_violation(e: &SqlxError) -> bool {
    e.as_database_error()
        .is_some_and(|db_err| db_err.is_foreign_key_violation())
}

/// Escape `%`, `_` and `\` so user input matches literally inside `LIKE`
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%input%` pattern for substring matching
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}

/// Create a "user not found" error
pub fn user_not_found(id: &str) -> DomainError {
    DomainError::UserNotFound(id.to_string())
}

/// Create an "event not found" error
pub fn event_not_found(id: impl ToString) -> DomainError {
    DomainError::EventNotFound(id.to_string())
}

/// Create a "review not found" error
pub fn review_not_found(id: Uuid) -> DomainError {
    DomainError::ReviewNotFound(id)
}

/// Create a "post not found" error
pub fn post_not_found(id: Uuid) -> DomainError {
    DomainError::PostNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: Uuid) -> DomainError {
    DomainError::CommentNotFound(id)
}
