//! GraphQL queries for the identity domain.

use juniper::FieldResult;

use crate::domains::identity::data::UserData;
use crate::domains::identity::models::UserRecord;
use crate::server::graphql::context::GraphQLContext;

/// Get the current user's profile, if one has been created
pub async fn me(ctx: &GraphQLContext) -> FieldResult<Option<UserData>> {
    let Some(user) = ctx.auth_user.as_ref() else {
        return Ok(None);
    };

    let record = UserRecord::find_by_id(user.principal.id, &ctx.db_pool).await?;
    Ok(record.map(UserData::from))
}
