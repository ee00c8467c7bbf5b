//! Profile editing.
//!
//! The avatar (when provided) is uploaded before the row is touched; an
//! upload failure aborts the whole edit.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::common::UserId;
use crate::domains::identity::models::UserRecord;
use crate::kernel::storage::AVATARS_BUCKET;
use crate::kernel::ServerDeps;

pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Decoded avatar bytes and content type, if the user picked a new one
    pub photo: Option<(Vec<u8>, String)>,
}

pub async fn update_profile(
    user_id: UserId,
    update: ProfileUpdate,
    deps: &ServerDeps,
) -> Result<UserRecord> {
    let avatar_url = match update.photo {
        Some((bytes, content_type)) => {
            let path = format!("{}_{}", user_id, Utc::now().timestamp_millis());
            let url = deps
                .storage
                .upload(AVATARS_BUCKET, &path, &content_type, bytes)
                .await
                .context("Failed to upload profile picture")?;
            Some(url)
        }
        None => None,
    };

    let user = UserRecord::update_profile(
        user_id,
        update.first_name,
        update.last_name,
        avatar_url,
        &deps.db_pool,
    )
    .await?;

    info!(%user_id, "Profile updated");
    Ok(user)
}
