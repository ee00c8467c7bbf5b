//! GraphQL queries for the posts domain.

use juniper::FieldResult;

use crate::common::PostId;
use crate::domains::posts::data::{PostData, TimeRangeData};
use crate::domains::posts::models::{PostRecord, TimeRange};
use crate::server::graphql::context::GraphQLContext;

/// Get posts within a recency window (default: last seven days)
pub async fn posts(
    ctx: &GraphQLContext,
    time_range: Option<TimeRangeData>,
) -> FieldResult<Vec<PostData>> {
    let range = time_range.map(TimeRange::from).unwrap_or(TimeRange::SevenDays);

    let posts = PostRecord::find_in_range(range, &ctx.db_pool).await?;
    Ok(posts.into_iter().map(PostData::from).collect())
}

/// Get a single post by ID
pub async fn post(ctx: &GraphQLContext, id: String) -> FieldResult<Option<PostData>> {
    let post_id = PostId::parse(&id)?;

    let post = PostRecord::find_by_id(post_id, &ctx.db_pool).await?;
    Ok(post.map(PostData::from))
}

/// Get the current user's own posts
pub async fn my_posts(ctx: &GraphQLContext) -> FieldResult<Vec<PostData>> {
    let user = ctx.require_auth()?;

    let posts = PostRecord::find_by_owner(user.principal.id, &ctx.db_pool).await?;
    Ok(posts.into_iter().map(PostData::from).collect())
}
