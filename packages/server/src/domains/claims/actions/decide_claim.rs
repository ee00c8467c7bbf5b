//! Owner-side claim decisions.
//!
//! The claim transition and the post transition commit in one transaction;
//! observers never see a decided claim with an unchanged post. The chat
//! notification runs after commit as a retryable side effect keyed by the
//! claim id, so a failure there leaves the decision in place and is only
//! logged.

use tracing::{info, warn};

use crate::common::{ChatId, ClaimId, UserId};
use crate::domains::chats::actions::notify_decision;
use crate::domains::claims::error::ClaimError;
use crate::domains::claims::models::{ClaimRecord, ClaimStatus};
use crate::domains::identity::models::UserRecord;
use crate::domains::posts::models::PostRecord;
use crate::kernel::ServerDeps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

#[derive(Debug)]
pub struct DecisionOutcome {
    pub claim: ClaimRecord,
    pub post: PostRecord,
    /// Set when the notification side effect succeeded
    pub chat_id: Option<ChatId>,
}

pub async fn decide_claim(
    owner_id: UserId,
    claim_id: ClaimId,
    decision: Decision,
    deps: &ServerDeps,
) -> Result<DecisionOutcome, ClaimError> {
    let claim = ClaimRecord::find_by_id(claim_id, &deps.db_pool)
        .await?
        .ok_or(ClaimError::NotFound)?;
    let post = PostRecord::find_by_id(claim.post_id, &deps.db_pool)
        .await
        .map_err(ClaimError::Internal)?
        .ok_or(ClaimError::NotFound)?;

    if post.user_id != owner_id {
        return Err(ClaimError::PermissionDenied(
            "Only the post owner can decide this claim".into(),
        ));
    }

    // Names for the notification text, fetched before any write so a lookup
    // failure aborts cleanly.
    let owner = UserRecord::find_by_id(owner_id, &deps.db_pool)
        .await
        .map_err(ClaimError::Internal)?
        .ok_or(ClaimError::NotFound)?;
    let claimant = UserRecord::find_by_id(claim.claimer_id, &deps.db_pool)
        .await
        .map_err(ClaimError::Internal)?
        .ok_or(ClaimError::NotFound)?;

    let mut tx = deps.db_pool.begin().await?;

    let target = match decision {
        Decision::Approve => ClaimStatus::Approved,
        Decision::Reject => ClaimStatus::Rejected,
    };
    let decided = ClaimRecord::decide(claim_id, target, &mut tx)
        .await?
        .ok_or(ClaimError::ClaimNotPending)?;

    let updated_post = match decision {
        Decision::Approve => PostRecord::mark_claimed(post.id, claim.claimer_id, &mut tx)
            .await?
            .ok_or(ClaimError::PostNotClaimable)?,
        Decision::Reject => {
            // No-op when the post never left `active` (claim decided while
            // still pending) or was claimed by someone else since.
            PostRecord::release_claim(post.id, claim.claimer_id, &mut tx)
                .await?
                .unwrap_or(post)
        }
    };

    tx.commit().await?;

    info!(
        %claim_id,
        post_id = %updated_post.id,
        decision = ?decision,
        "Claim decided"
    );

    let content = decision_message(&owner, &claimant, &updated_post.title, decision);
    let decision_key = format!("{}:decision", claim_id);
    let chat_id = match notify_decision(
        updated_post.id,
        owner_id,
        decided.claimer_id,
        &content,
        &decision_key,
        deps,
    )
    .await
    {
        Ok((chat_id, _)) => Some(chat_id),
        Err(e) => {
            warn!(%claim_id, error = %e, "Decision notification failed");
            None
        }
    };

    Ok(DecisionOutcome {
        claim: decided,
        post: updated_post,
        chat_id,
    })
}

fn decision_message(
    owner: &UserRecord,
    claimant: &UserRecord,
    post_title: &str,
    decision: Decision,
) -> String {
    let owner_name = owner.display_name();
    let claimant_name = claimant.display_name();
    match decision {
        Decision::Approve => format!(
            "{} has accepted {}'s claim for \"{}\". Start chatting!",
            owner_name, claimant_name, post_title
        ),
        Decision::Reject => format!(
            "{} has rejected {}'s claim for \"{}\".",
            owner_name, claimant_name, post_title
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(first: Option<&str>, email: &str) -> UserRecord {
        UserRecord {
            id: crate::common::UserId::new(),
            email: email.to_string(),
            first_name: first.map(String::from),
            last_name: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn approve_message_uses_first_names_and_title() {
        let owner = user(Some("Dana"), "dana@example.com");
        let claimant = user(Some("Riley"), "riley@example.com");
        let msg = decision_message(&owner, &claimant, "Blue Backpack", Decision::Approve);
        assert_eq!(
            msg,
            "Dana has accepted Riley's claim for \"Blue Backpack\". Start chatting!"
        );
    }

    #[test]
    fn reject_message_has_no_chat_prompt() {
        let owner = user(Some("Dana"), "dana@example.com");
        let claimant = user(None, "riley@example.com");
        let msg = decision_message(&owner, &claimant, "Blue Backpack", Decision::Reject);
        assert_eq!(
            msg,
            "Dana has rejected riley@example.com's claim for \"Blue Backpack\"."
        );
    }
}
