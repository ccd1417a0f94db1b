//! Supabase adapters: Auth (identity) and Storage (objects)

mod auth;
mod storage;

pub use auth::SupabaseAuthClient;
pub use storage::SupabaseStorageClient;
