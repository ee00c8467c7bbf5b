//! Claim submission.
//!
//! Validation and the post-status precondition run before any write. When a
//! verification photo is attached it is uploaded first; an upload failure
//! aborts the submission with no claim row inserted.

use chrono::Utc;
use tracing::info;

use crate::common::{PostId, UserId};
use crate::domains::claims::error::ClaimError;
use crate::domains::claims::models::ClaimRecord;
use crate::domains::posts::models::{PostRecord, PostStatus};
use crate::kernel::storage::CLAIM_PICTURES_BUCKET;
use crate::kernel::ServerDeps;

pub struct ClaimQuestionnaire {
    /// When the claimant says they lost the item
    pub lost_date: String,
    /// Identifying details only the true owner would know
    pub specific_details: String,
    pub has_picture: bool,
    /// Decoded photo bytes and content type; required when `has_picture`
    pub photo: Option<(Vec<u8>, String)>,
    pub agreed_to_policy: bool,
}

impl ClaimQuestionnaire {
    fn validate(&self) -> Result<(), ClaimError> {
        if self.lost_date.trim().is_empty() {
            return Err(ClaimError::Validation(
                "Please tell us when you lost the item".into(),
            ));
        }
        if self.specific_details.trim().is_empty() {
            return Err(ClaimError::Validation(
                "Please describe identifying details of the item".into(),
            ));
        }
        if self.has_picture && self.photo.is_none() {
            return Err(ClaimError::Validation(
                "You indicated you have a picture but none was attached".into(),
            ));
        }
        if !self.agreed_to_policy {
            return Err(ClaimError::Validation(
                "You must agree to the claim policy".into(),
            ));
        }
        Ok(())
    }
}

pub async fn submit_claim(
    claimant_id: UserId,
    post_id: PostId,
    questionnaire: ClaimQuestionnaire,
    deps: &ServerDeps,
) -> Result<ClaimRecord, ClaimError> {
    questionnaire.validate()?;

    let post = PostRecord::find_by_id(post_id, &deps.db_pool)
        .await
        .map_err(ClaimError::Internal)?
        .ok_or(ClaimError::NotFound)?;

    if post.user_id == claimant_id {
        return Err(ClaimError::Validation(
            "You cannot claim your own post".into(),
        ));
    }
    if post.status_enum().map_err(ClaimError::Internal)? != PostStatus::Active {
        return Err(ClaimError::PostNotClaimable);
    }

    let picture_url = match questionnaire.photo {
        Some((bytes, content_type)) if questionnaire.has_picture => {
            let path = format!(
                "{}_{}_{}",
                claimant_id,
                post_id,
                Utc::now().timestamp_millis()
            );
            let url = deps
                .storage
                .upload(CLAIM_PICTURES_BUCKET, &path, &content_type, bytes)
                .await
                .map_err(|e| ClaimError::Upload(e.to_string()))?;
            Some(url)
        }
        _ => None,
    };

    let claim = ClaimRecord::create(
        post_id,
        claimant_id,
        questionnaire.lost_date.trim(),
        questionnaire.specific_details.trim(),
        questionnaire.has_picture,
        picture_url,
        questionnaire.agreed_to_policy,
        &deps.db_pool,
    )
    .await?
    .ok_or(ClaimError::DuplicateClaim)?;

    info!(claim_id = %claim.id, %post_id, %claimant_id, "Claim submitted");
    Ok(claim)
}
