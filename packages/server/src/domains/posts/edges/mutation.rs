//! GraphQL mutations for the posts domain.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use juniper::FieldResult;

use crate::common::PostId;
use crate::domains::posts::actions::{create_post, NewPost};
use crate::domains::posts::data::{CreatePostInput, PhotoInput, PostData};
use crate::domains::posts::models::PostRecord;
use crate::server::graphql::context::GraphQLContext;

pub(crate) fn decode_photo(photo: PhotoInput) -> FieldResult<(Vec<u8>, String)> {
    let bytes = BASE64
        .decode(photo.data_base64.as_bytes())
        .map_err(|_| "Photo payload is not valid base64")?;
    Ok((bytes, photo.content_type))
}

/// Create a new lost-item post, optionally with an inline photo
pub async fn create_post_mutation(
    ctx: &GraphQLContext,
    input: CreatePostInput,
) -> FieldResult<PostData> {
    let user = ctx.require_auth()?;

    let photo = input.photo.map(decode_photo).transpose()?;
    let new_post = NewPost {
        title: input.title,
        description: input.description,
        location: input.location,
        latitude: input.latitude,
        longitude: input.longitude,
        photo,
    };

    let post = create_post(user.principal.id, new_post, &ctx.deps).await?;
    Ok(PostData::from(post))
}

/// Mark a claimed post as resolved (handed over). Owner only.
pub async fn mark_resolved(ctx: &GraphQLContext, post_id: String) -> FieldResult<PostData> {
    let user = ctx.require_auth()?;
    let post_id = PostId::parse(&post_id)?;

    let post = PostRecord::mark_resolved(post_id, user.principal.id, &ctx.db_pool)
        .await?
        .ok_or("Post is not in a claimed state or you are not the owner")?;

    Ok(PostData::from(post))
}
