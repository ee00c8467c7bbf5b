//! Message persistence.
//!
//! Whether a message is a decision notification is stored in `kind` at
//! creation time rather than inferred from the text. System messages carry a
//! `decision_key` (unique) so a retried decision never double-sends.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{ChatId, MessageId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    User,
    System,
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageKind::User => write!(f, "user"),
            MessageKind::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for MessageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "user" => Ok(MessageKind::User),
            "system" => Ok(MessageKind::System),
            other => Err(anyhow::anyhow!("Unknown message kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MessageRecord {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub user_id: UserId,
    pub content: String,
    pub kind: String,
    pub decision_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MessageRecord {
    pub async fn create(
        chat_id: ChatId,
        user_id: UserId,
        content: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        let message = sqlx::query_as::<_, MessageRecord>(
            r#"
            INSERT INTO messages (id, chat_id, user_id, content, kind)
            VALUES ($1, $2, $3, $4, 'user')
            RETURNING *
            "#,
        )
        .bind(MessageId::new())
        .bind(chat_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(pool)
        .await?;
        Ok(message)
    }

    /// Append a system notification, at most once per `decision_key`.
    /// Returns the existing row if the key was already delivered.
    pub async fn create_system(
        chat_id: ChatId,
        author_id: UserId,
        content: &str,
        decision_key: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        let inserted = sqlx::query_as::<_, MessageRecord>(
            r#"
            INSERT INTO messages (id, chat_id, user_id, content, kind, decision_key)
            VALUES ($1, $2, $3, $4, 'system', $5)
            ON CONFLICT (decision_key) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(MessageId::new())
        .bind(chat_id)
        .bind(author_id)
        .bind(content)
        .bind(decision_key)
        .fetch_optional(pool)
        .await?;

        if let Some(message) = inserted {
            return Ok(message);
        }

        let existing =
            sqlx::query_as::<_, MessageRecord>("SELECT * FROM messages WHERE decision_key = $1")
                .bind(decision_key)
                .fetch_one(pool)
                .await?;
        Ok(existing)
    }

    /// Messages in a chat, oldest first.
    pub async fn find_for_chat(chat_id: ChatId, pool: &PgPool) -> Result<Vec<Self>> {
        let messages = sqlx::query_as::<_, MessageRecord>(
            "SELECT * FROM messages WHERE chat_id = $1 ORDER BY created_at ASC",
        )
        .bind(chat_id)
        .fetch_all(pool)
        .await?;
        Ok(messages)
    }

    pub async fn latest_for_chat(chat_id: ChatId, pool: &PgPool) -> Result<Option<Self>> {
        let message = sqlx::query_as::<_, MessageRecord>(
            "SELECT * FROM messages WHERE chat_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(chat_id)
        .fetch_optional(pool)
        .await?;
        Ok(message)
    }

    pub fn kind_enum(&self) -> Result<MessageKind> {
        self.kind.parse()
    }
}
