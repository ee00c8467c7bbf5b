//! GraphQL data types for chats and messages.

use serde::{Deserialize, Serialize};

use crate::domains::chats::models::{ChatRecord, MessageRecord};

/// A conversation thread between a post owner and a claimant
#[derive(Debug, Clone, Serialize, Deserialize, juniper::GraphQLObject)]
pub struct ChatData {
    pub id: String,
    pub post_id: String,
    /// Post owner
    pub creator_id: String,
    /// Claimant
    pub claimer_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ChatRecord> for ChatData {
    fn from(c: ChatRecord) -> Self {
        Self {
            id: c.id.to_string(),
            post_id: c.post_id.to_string(),
            creator_id: c.creator_id.to_string(),
            claimer_id: c.claimer_id.to_string(),
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// A chat message; `kind` is `user` or `system`
#[derive(Debug, Clone, Serialize, Deserialize, juniper::GraphQLObject)]
pub struct MessageData {
    pub id: String,
    pub chat_id: String,
    pub user_id: String,
    pub content: String,
    pub kind: String,
    pub created_at: String,
}

impl From<MessageRecord> for MessageData {
    fn from(m: MessageRecord) -> Self {
        Self {
            id: m.id.to_string(),
            chat_id: m.chat_id.to_string(),
            user_id: m.user_id.to_string(),
            content: m.content,
            kind: m.kind,
            created_at: m.created_at.to_rfc3339(),
        }
    }
}
