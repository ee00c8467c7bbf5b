//! GraphQL queries for the chats domain.

use juniper::FieldResult;

use crate::common::ChatId;
use crate::domains::chats::data::{ChatData, MessageData};
use crate::domains::chats::models::{ChatRecord, MessageRecord};
use crate::server::graphql::context::GraphQLContext;

/// The current user's chats, most recently active first
pub async fn my_chats(ctx: &GraphQLContext) -> FieldResult<Vec<ChatData>> {
    let user = ctx.require_auth()?;

    let chats = ChatRecord::find_for_user(user.principal.id, &ctx.db_pool).await?;
    Ok(chats.into_iter().map(ChatData::from).collect())
}

/// A single chat, restricted to its participants
pub async fn chat(ctx: &GraphQLContext, id: String) -> FieldResult<ChatData> {
    let user = ctx.require_auth()?;
    let chat_id = ChatId::parse(&id)?;

    let chat = ChatRecord::find_by_id(chat_id, &ctx.db_pool)
        .await?
        .ok_or("Chat not found")?;
    if !chat.is_participant(user.principal.id) {
        return Err("You are not a participant in this chat".into());
    }

    Ok(ChatData::from(chat))
}

/// Messages in a chat, oldest first, restricted to its participants
pub async fn messages(ctx: &GraphQLContext, chat_id: String) -> FieldResult<Vec<MessageData>> {
    let user = ctx.require_auth()?;
    let chat_id = ChatId::parse(&chat_id)?;

    let chat = ChatRecord::find_by_id(chat_id, &ctx.db_pool)
        .await?
        .ok_or("Chat not found")?;
    if !chat.is_participant(user.principal.id) {
        return Err("You are not a participant in this chat".into());
    }

    let messages = MessageRecord::find_for_chat(chat_id, &ctx.db_pool).await?;
    Ok(messages.into_iter().map(MessageData::from).collect())
}
