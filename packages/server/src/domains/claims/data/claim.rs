//! GraphQL data types for claims.

use serde::{Deserialize, Serialize};

use crate::domains::claims::actions::DecisionOutcome;
use crate::domains::claims::models::ClaimRecord;
use crate::domains::posts::data::{PhotoInput, PostData};

/// A claim with its verification questionnaire
#[derive(Debug, Clone, Serialize, Deserialize, juniper::GraphQLObject)]
pub struct ClaimData {
    pub id: String,
    pub post_id: String,
    pub claimer_id: String,
    /// Status: pending, approved, rejected
    pub status: String,
    pub lost_date: String,
    pub specific_details: String,
    pub has_picture: bool,
    pub picture_url: Option<String>,
    pub agreed_to_policy: bool,
    pub created_at: String,
}

impl From<ClaimRecord> for ClaimData {
    fn from(c: ClaimRecord) -> Self {
        Self {
            id: c.id.to_string(),
            post_id: c.post_id.to_string(),
            claimer_id: c.claimer_id.to_string(),
            status: c.status,
            lost_date: c.lost_date,
            specific_details: c.specific_details,
            has_picture: c.has_picture,
            picture_url: c.picture_url,
            agreed_to_policy: c.agreed_to_policy,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Input for submitting a claim against a post
#[derive(Debug, Clone, juniper::GraphQLInputObject)]
pub struct SubmitClaimInput {
    pub post_id: String,
    /// When the claimant lost the item (free text)
    pub lost_date: String,
    /// Identifying details only the true owner would know
    pub specific_details: String,
    pub has_picture: bool,
    /// Verification photo; required when `has_picture` is true
    pub photo: Option<PhotoInput>,
    pub agreed_to_policy: bool,
}

/// Result of an approve/reject decision
#[derive(Debug, Clone, juniper::GraphQLObject)]
pub struct ClaimDecisionData {
    pub claim: ClaimData,
    pub post: PostData,
    /// Chat carrying the notification, when delivery succeeded
    pub chat_id: Option<String>,
}

impl From<DecisionOutcome> for ClaimDecisionData {
    fn from(o: DecisionOutcome) -> Self {
        Self {
            claim: ClaimData::from(o.claim),
            post: PostData::from(o.post),
            chat_id: o.chat_id.map(|id| id.to_string()),
        }
    }
}
