//! # setlistd-clients
//!
//! reqwest-based implementations of the outbound ports defined in
//! `setlistd-core`:
//!
//! - [`SupabaseAuthClient`] - `IdentityProvider` backed by Supabase Auth
//! - [`SupabaseStorageClient`] - `ObjectStorage` backed by Supabase Storage
//! - [`SeatGeekClient`] - `EventCatalog` backed by the SeatGeek events API
//!
//! All clients share one [`reqwest::Client`] built by [`build_http_client`].

mod http;
pub mod seatgeek;
pub mod supabase;

pub use http::build_http_client;
pub use seatgeek::SeatGeekClient;
pub use supabase::{SupabaseAuthClient, SupabaseStorageClient};
