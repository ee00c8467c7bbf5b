//! GraphQL mutations for the chats domain.

use juniper::FieldResult;
use tracing::info;

use crate::common::{ChatId, PostId};
use crate::domains::chats::actions;
use crate::domains::chats::data::{ChatData, MessageData};
use crate::domains::chats::models::ChatRecord;
use crate::domains::posts::models::PostRecord;
use crate::server::graphql::context::GraphQLContext;

/// Start (or return the existing) chat with a post's owner
pub async fn start_chat(ctx: &GraphQLContext, post_id: String) -> FieldResult<ChatData> {
    let user = ctx.require_auth()?;
    let post_id = PostId::parse(&post_id)?;

    let post = PostRecord::find_by_id(post_id, &ctx.db_pool)
        .await?
        .ok_or("Post not found")?;
    if post.user_id == user.principal.id {
        return Err("You cannot start a chat on your own post".into());
    }

    let chat =
        ChatRecord::find_or_create(post_id, post.user_id, user.principal.id, &ctx.db_pool).await?;
    Ok(ChatData::from(chat))
}

/// Send a message to a chat the current user participates in
pub async fn send_message(
    ctx: &GraphQLContext,
    chat_id: String,
    content: String,
) -> FieldResult<MessageData> {
    let user = ctx.require_auth()?;
    let chat_id = ChatId::parse(&chat_id)?;

    info!(%chat_id, user_id = %user.principal.id, "Sending chat message");

    let message = actions::send_message(user.principal.id, chat_id, content, &ctx.deps).await?;
    Ok(MessageData::from(message))
}
