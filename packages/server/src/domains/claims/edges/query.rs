//! GraphQL queries for the claims domain.

use juniper::FieldResult;

use crate::common::PostId;
use crate::domains::claims::data::ClaimData;
use crate::domains::claims::models::ClaimRecord;
use crate::domains::posts::models::PostRecord;
use crate::server::graphql::context::GraphQLContext;

/// Claims the current user has submitted
pub async fn my_claims(ctx: &GraphQLContext) -> FieldResult<Vec<ClaimData>> {
    let user = ctx.require_auth()?;

    let claims = ClaimRecord::find_by_claimer(user.principal.id, &ctx.db_pool).await?;
    Ok(claims.into_iter().map(ClaimData::from).collect())
}

/// Incoming claims against the current user's posts
pub async fn claims_on_my_posts(ctx: &GraphQLContext) -> FieldResult<Vec<ClaimData>> {
    let user = ctx.require_auth()?;

    let claims = ClaimRecord::find_for_owner(user.principal.id, &ctx.db_pool).await?;
    Ok(claims.into_iter().map(ClaimData::from).collect())
}

/// Claims against one post; owner only
pub async fn claims_for_post(ctx: &GraphQLContext, post_id: String) -> FieldResult<Vec<ClaimData>> {
    let user = ctx.require_auth()?;
    let post_id = PostId::parse(&post_id)?;

    let post = PostRecord::find_by_id(post_id, &ctx.db_pool)
        .await?
        .ok_or("Post not found")?;
    if post.user_id != user.principal.id {
        return Err("Only the post owner can view its claims".into());
    }

    let claims = ClaimRecord::find_for_post(post_id, &ctx.db_pool).await?;
    Ok(claims.into_iter().map(ClaimData::from).collect())
}
