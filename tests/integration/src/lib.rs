//! Integration test utilities for the Setlistd server
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API, with a local stand-in for the identity provider, object
//! storage and the events catalog.

pub mod fixtures;
pub mod helpers;
pub mod upstream;

pub use fixtures::*;
pub use helpers::*;
