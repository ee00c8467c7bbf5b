//! Object-storage seam (using a trait for testability).
//!
//! Production uses [`StorageAdapter`] over the `storage` REST client; tests
//! use [`MemoryStorageService`] so no network is involved.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use storage::StorageService;

/// Bucket for item photos attached to posts.
pub const POST_IMAGES_BUCKET: &str = "post-images";

/// Bucket for claim-verification photos.
pub const CLAIM_PICTURES_BUCKET: &str = "claim-pictures";

/// Bucket for profile pictures.
pub const AVATARS_BUCKET: &str = "avatars";

/// Trait abstraction over the object storage collaborator.
///
/// `upload` returns the public URL of the stored object.
#[async_trait]
pub trait BaseStorageService: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String>;
}

/// Wrapper around StorageService that implements the BaseStorageService trait
pub struct StorageAdapter(pub StorageService);

impl StorageAdapter {
    pub fn new(service: StorageService) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseStorageService for StorageAdapter {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        self.0
            .upload(bucket, path, content_type, bytes)
            .await
            .map_err(Into::into)
    }
}

/// In-memory storage used by the test harness.
///
/// Records every upload and returns deterministic fake public URLs.
#[derive(Default)]
pub struct MemoryStorageService {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    /// When set, every upload fails with this message (for UploadError paths).
    pub fail_with: Option<String>,
}

impl MemoryStorageService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: &str) -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            fail_with: Some(message.to_string()),
        }
    }

    /// Number of stored objects (for test assertions).
    pub fn object_count(&self) -> usize {
        self.objects.lock().expect("storage mutex poisoned").len()
    }
}

#[async_trait]
impl BaseStorageService for MemoryStorageService {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        if let Some(message) = &self.fail_with {
            anyhow::bail!("{}", message);
        }
        let key = format!("{}/{}", bucket, path);
        self.objects
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.clone(), bytes);
        Ok(format!("https://storage.test/object/public/{}", key))
    }
}
