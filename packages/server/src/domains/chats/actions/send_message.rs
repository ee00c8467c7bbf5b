//! Message sending plus the decision-notification side effect.

use anyhow::{anyhow, Result};

use crate::common::{ChatId, PostId, UserId};
use crate::domains::chats::data::MessageData;
use crate::domains::chats::models::{ChatRecord, MessageRecord};
use crate::kernel::ServerDeps;

/// Send a user message into a chat the author participates in, and fan it
/// out to live subscribers.
pub async fn send_message(
    author_id: UserId,
    chat_id: ChatId,
    content: String,
    deps: &ServerDeps,
) -> Result<MessageRecord> {
    let content = content.trim();
    if content.is_empty() {
        return Err(anyhow!("Message content cannot be empty"));
    }

    let chat = ChatRecord::find_by_id(chat_id, &deps.db_pool)
        .await?
        .ok_or_else(|| anyhow!("Chat not found"))?;
    if !chat.is_participant(author_id) {
        return Err(anyhow!("You are not a participant in this chat"));
    }

    let message = MessageRecord::create(chat_id, author_id, content, &deps.db_pool).await?;
    ChatRecord::touch(chat_id, &deps.db_pool).await?;

    publish(deps, &message).await;
    Ok(message)
}

/// Deliver a claim-decision notification: find or create the chat for the
/// post and participant pair, then append a system message keyed by
/// `decision_key` so a retried decision does not send twice.
pub async fn notify_decision(
    post_id: PostId,
    owner_id: UserId,
    claimant_id: UserId,
    content: &str,
    decision_key: &str,
    deps: &ServerDeps,
) -> Result<(ChatId, MessageRecord)> {
    let chat = ChatRecord::find_or_create(post_id, owner_id, claimant_id, &deps.db_pool).await?;
    let message =
        MessageRecord::create_system(chat.id, owner_id, content, decision_key, &deps.db_pool)
            .await?;
    ChatRecord::touch(chat.id, &deps.db_pool).await?;

    publish(deps, &message).await;
    Ok((chat.id, message))
}

async fn publish(deps: &ServerDeps, message: &MessageRecord) {
    match serde_json::to_value(MessageData::from(message.clone())) {
        Ok(payload) => deps.chat_hub.publish(message.chat_id, payload).await,
        Err(e) => tracing::warn!(error = %e, "Failed to serialize message for broadcast"),
    }
}
