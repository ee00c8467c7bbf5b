//! Object storage REST client.
//!
//! Speaks the Supabase-storage-style HTTP contract: authenticated uploads to
//! `POST {base_url}/object/{bucket}/{path}` and unauthenticated public reads
//! from `{base_url}/object/public/{bucket}/{path}`.

use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("object already exists at {path}")]
    AlreadyExists { path: String },

    #[error("storage returned {status}: {body}")]
    Api { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
pub struct StorageOptions {
    /// Base URL of the storage API, e.g. `https://xyz.supabase.co/storage/v1`
    pub base_url: String,
    /// Service-role API key used for uploads
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct StorageService {
    options: StorageOptions,
    client: Client,
}

/// Body returned by the storage API on a successful upload
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "Key", alias = "key")]
    pub key: String,
}

impl StorageService {
    pub fn new(options: StorageOptions) -> Self {
        Self {
            options,
            client: Client::new(),
        }
    }

    /// Upload an object and return its public URL.
    ///
    /// The path is relative to the bucket (e.g. `claim-pictures/abc_123`).
    /// Uploads never overwrite: an existing object at the same path is an error.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let url = format!(
            "{base}/object/{bucket}/{path}",
            base = self.options.base_url.trim_end_matches('/'),
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.options.api_key)
            .header(header::CONTENT_TYPE, content_type)
            .header(header::CACHE_CONTROL, "3600")
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                // The response key is informational; the public URL is derived
                // from the bucket and path we chose.
                let _ = response.json::<UploadResponse>().await;
                Ok(self.public_url(bucket, path))
            }
            StatusCode::CONFLICT => Err(StorageError::AlreadyExists {
                path: path.to_string(),
            }),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StorageError::Api { status, body })
            }
        }
    }

    /// Public (unauthenticated) URL for an object in a public bucket.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{base}/object/public/{bucket}/{path}",
            base = self.options.base_url.trim_end_matches('/'),
        )
    }

    /// Delete an object. Used when cascading account deletion.
    pub async fn delete(&self, bucket: &str, path: &str) -> Result<(), StorageError> {
        let url = format!(
            "{base}/object/{bucket}/{path}",
            base = self.options.base_url.trim_end_matches('/'),
        );

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.options.api_key)
            .send()
            .await?;

        if response.status().is_success() || response.status() == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(StorageError::Api { status, body })
        }
    }
}
