//! GraphQL mutations for the claims domain.

use juniper::FieldResult;
use tracing::info;

use crate::common::{ClaimId, PostId};
use crate::domains::claims::actions::{
    decide_claim, submit_claim, ClaimQuestionnaire, Decision,
};
use crate::domains::claims::data::{ClaimData, ClaimDecisionData, SubmitClaimInput};
use crate::domains::posts::edges::mutation::decode_photo;
use crate::server::graphql::context::GraphQLContext;

/// Submit a verification questionnaire against an active post
pub async fn submit_claim_mutation(
    ctx: &GraphQLContext,
    input: SubmitClaimInput,
) -> FieldResult<ClaimData> {
    let user = ctx.require_auth()?;
    let post_id = PostId::parse(&input.post_id)?;

    let photo = input.photo.map(decode_photo).transpose()?;
    let questionnaire = ClaimQuestionnaire {
        lost_date: input.lost_date,
        specific_details: input.specific_details,
        has_picture: input.has_picture,
        photo,
        agreed_to_policy: input.agreed_to_policy,
    };

    let claim = submit_claim(user.principal.id, post_id, questionnaire, &ctx.deps)
        .await
        .map_err(|e| e.into_field_error())?;
    Ok(ClaimData::from(claim))
}

/// Approve a pending claim on one of the current user's posts
pub async fn approve_claim(ctx: &GraphQLContext, claim_id: String) -> FieldResult<ClaimDecisionData> {
    decide(ctx, claim_id, Decision::Approve).await
}

/// Reject a pending claim on one of the current user's posts
pub async fn reject_claim(ctx: &GraphQLContext, claim_id: String) -> FieldResult<ClaimDecisionData> {
    decide(ctx, claim_id, Decision::Reject).await
}

async fn decide(
    ctx: &GraphQLContext,
    claim_id: String,
    decision: Decision,
) -> FieldResult<ClaimDecisionData> {
    let user = ctx.require_auth()?;
    let claim_id = ClaimId::parse(&claim_id)?;

    info!(%claim_id, ?decision, owner_id = %user.principal.id, "Deciding claim");

    let outcome = decide_claim(user.principal.id, claim_id, decision, &ctx.deps)
        .await
        .map_err(|e| e.into_field_error())?;
    Ok(ClaimDecisionData::from(outcome))
}
