//! Account deletion
//!
//! Cascades a user's posts, claims, chats, and messages in one transaction,
//! then removes the user row itself.

use anyhow::Result;
use sqlx::PgPool;
use tracing::info;

use crate::common::UserId;

pub async fn delete_account(user_id: UserId, pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;

    // Posts cascade their claims, chats, and messages at the schema level.
    sqlx::query("DELETE FROM posts WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    // Claims this user filed against other people's posts.
    sqlx::query("DELETE FROM claims WHERE claimer_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    // Posts this user had claimed go back on the board; leaving the
    // reference behind would break the claimed-iff-claimer constraint.
    sqlx::query(
        "UPDATE posts SET status = 'active', claimer_id = NULL, updated_at = NOW()
         WHERE claimer_id = $1",
    )
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    // Chats this user participates in (messages cascade with the chat).
    sqlx::query("DELETE FROM chats WHERE creator_id = $1 OR claimer_id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    info!(%user_id, "Account deleted");
    Ok(())
}
