//! GraphQL mutations for the identity domain.

use juniper::FieldResult;
use tracing::info;

use crate::domains::identity::actions::{self, ProfileUpdate};
use crate::domains::identity::data::{UpdateProfileInput, UserData};
use crate::domains::posts::edges::mutation::decode_photo;
use crate::server::graphql::context::GraphQLContext;

/// Ensure a user row exists for the authenticated principal.
///
/// Called by the client after the OAuth callback; safe to call repeatedly.
pub async fn ensure_profile(ctx: &GraphQLContext) -> FieldResult<UserData> {
    let user = ctx.require_auth()?;

    let record = actions::ensure_user_record(&user.principal, &ctx.db_pool).await?;
    Ok(UserData::from(record))
}

/// Update the current user's names and profile picture
pub async fn update_profile(
    ctx: &GraphQLContext,
    input: UpdateProfileInput,
) -> FieldResult<UserData> {
    let user = ctx.require_auth()?;

    let photo = input.photo.map(decode_photo).transpose()?;
    let record = actions::update_profile(
        user.principal.id,
        ProfileUpdate {
            first_name: input.first_name,
            last_name: input.last_name,
            photo,
        },
        &ctx.deps,
    )
    .await?;
    Ok(UserData::from(record))
}

/// Delete the authenticated user's account and everything it owns
pub async fn delete_account(ctx: &GraphQLContext) -> FieldResult<bool> {
    let user = ctx.require_auth()?;

    info!(user_id = %user.principal.id, "Deleting account");
    actions::delete_account(user.principal.id, &ctx.db_pool).await?;
    Ok(true)
}
