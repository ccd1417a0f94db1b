//! Supabase Storage implementation of ObjectStorage

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{info, instrument};

use setlistd_common::SupabaseConfig;
use setlistd_core::{ObjectStorage, RepoResult};

use crate::http::{status_error, transport_error};

const SERVICE: &str = "supabase-storage";
const FAILURE: &str = "Failed to upload file";

/// Object storage backed by Supabase Storage, authenticated with the service key
#[derive(Clone)]
pub struct SupabaseStorageClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl SupabaseStorageClient {
    pub fn new(client: Client, config: &SupabaseConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            service_key: config.service_role_key.clone(),
        }
    }

    fn object_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{key}", self.base_url)
    }

    /// Public URL of an object in a public bucket
    pub fn public_url(&self, bucket: &str, key: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{key}", self.base_url)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorageClient {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> RepoResult<String> {
        let response = self
            .client
            .post(self.object_url(bucket, key))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, FAILURE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, FAILURE, response).await);
        }

        info!(bucket, key, "Object uploaded");
        Ok(self.public_url(bucket, key))
    }
}
