//! Post creation action
//!
//! Uploads the item photo (when provided) before inserting the row; an
//! upload failure aborts the whole creation.

use anyhow::{Context, Result};
use chrono::Utc;

use crate::common::UserId;
use crate::domains::posts::models::PostRecord;
use crate::kernel::storage::POST_IMAGES_BUCKET;
use crate::kernel::ServerDeps;

pub struct NewPost {
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Decoded photo bytes and content type, if the owner attached one
    pub photo: Option<(Vec<u8>, String)>,
}

pub async fn create_post(owner_id: UserId, input: NewPost, deps: &ServerDeps) -> Result<PostRecord> {
    let image_url = match input.photo {
        Some((bytes, content_type)) => {
            let path = format!("{}_{}", owner_id, Utc::now().timestamp_millis());
            let url = deps
                .storage
                .upload(POST_IMAGES_BUCKET, &path, &content_type, bytes)
                .await
                .context("Failed to upload post image")?;
            Some(url)
        }
        None => None,
    };

    PostRecord::create(
        owner_id,
        &input.title,
        &input.description,
        &input.location,
        input.latitude,
        input.longitude,
        image_url,
        &deps.db_pool,
    )
    .await
}
