//! Chat thread persistence.
//!
//! A chat is keyed by the post plus the unordered pair of participants; the
//! schema enforces uniqueness on (post_id, LEAST(ids), GREATEST(ids)), so
//! `find_or_create` treats an insert conflict as "already exists".

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{ChatId, PostId, UserId};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChatRecord {
    pub id: ChatId,
    pub post_id: PostId,
    pub creator_id: UserId,
    pub claimer_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatRecord {
    pub async fn find_by_id(id: ChatId, pool: &PgPool) -> Result<Option<Self>> {
        let chat = sqlx::query_as::<_, ChatRecord>("SELECT * FROM chats WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(chat)
    }

    /// Find the chat for this post and participant pair, creating it if
    /// missing. Concurrent callers converge on the same row: the loser of
    /// the insert race falls through to the re-select.
    pub async fn find_or_create(
        post_id: PostId,
        creator_id: UserId,
        claimer_id: UserId,
        pool: &PgPool,
    ) -> Result<Self> {
        let inserted = sqlx::query_as::<_, ChatRecord>(
            r#"
            INSERT INTO chats (id, post_id, creator_id, claimer_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (post_id, LEAST(creator_id, claimer_id), GREATEST(creator_id, claimer_id))
            DO NOTHING
            RETURNING *
            "#,
        )
        .bind(ChatId::new())
        .bind(post_id)
        .bind(creator_id)
        .bind(claimer_id)
        .fetch_optional(pool)
        .await?;

        if let Some(chat) = inserted {
            return Ok(chat);
        }

        let existing = sqlx::query_as::<_, ChatRecord>(
            r#"
            SELECT * FROM chats
            WHERE post_id = $1
              AND LEAST(creator_id, claimer_id) = LEAST($2, $3)
              AND GREATEST(creator_id, claimer_id) = GREATEST($2, $3)
            "#,
        )
        .bind(post_id)
        .bind(creator_id)
        .bind(claimer_id)
        .fetch_one(pool)
        .await?;
        Ok(existing)
    }

    /// All chats the user participates in, most recently active first.
    pub async fn find_for_user(user_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        let chats = sqlx::query_as::<_, ChatRecord>(
            r#"
            SELECT * FROM chats
            WHERE creator_id = $1 OR claimer_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(chats)
    }

    pub async fn touch(id: ChatId, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE chats SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub fn is_participant(&self, user_id: UserId) -> bool {
        self.creator_id == user_id || self.claimer_id == user_id
    }
}
