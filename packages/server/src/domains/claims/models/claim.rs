//! Claim persistence.
//!
//! One canonical table holds both the claim state and the verification
//! questionnaire. A partial unique index on (post_id, claimer_id) WHERE
//! status = 'pending' enforces at most one open claim per pair.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{ClaimId, PostId, UserId};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRecord {
    pub id: ClaimId,
    pub post_id: PostId,
    pub claimer_id: UserId,
    pub status: String,
    /// When the claimant says they lost the item (free text from the form)
    pub lost_date: String,
    /// Identifying details only the true owner would know
    pub specific_details: String,
    pub has_picture: bool,
    pub picture_url: Option<String>,
    pub agreed_to_policy: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimStatus::Pending => write!(f, "pending"),
            ClaimStatus::Approved => write!(f, "approved"),
            ClaimStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ClaimStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            other => Err(anyhow::anyhow!("Unknown claim status: {}", other)),
        }
    }
}

impl ClaimRecord {
    pub async fn find_by_id(id: ClaimId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ClaimRecord>("SELECT * FROM claims WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new pending claim. Returns `Ok(None)` when the partial
    /// unique index rejects a second pending claim for the same pair.
    pub async fn create(
        post_id: PostId,
        claimer_id: UserId,
        lost_date: &str,
        specific_details: &str,
        has_picture: bool,
        picture_url: Option<String>,
        agreed_to_policy: bool,
        pool: &PgPool,
    ) -> Result<Option<Self>, sqlx::Error> {
        let result = sqlx::query_as::<_, ClaimRecord>(
            r#"
            INSERT INTO claims (
                id, post_id, claimer_id, status,
                lost_date, specific_details, has_picture, picture_url, agreed_to_policy
            )
            VALUES ($1, $2, $3, 'pending', $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(ClaimId::new())
        .bind(post_id)
        .bind(claimer_id)
        .bind(lost_date)
        .bind(specific_details)
        .bind(has_picture)
        .bind(picture_url)
        .bind(agreed_to_policy)
        .fetch_one(pool)
        .await;

        match result {
            Ok(claim) => Ok(Some(claim)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Move a pending claim to a terminal status, inside the decision
    /// transaction. Returns `None` if the claim was already decided.
    pub async fn decide(
        id: ClaimId,
        status: ClaimStatus,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, ClaimRecord>(
            r#"
            UPDATE claims
            SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .fetch_optional(&mut **tx)
        .await
    }

    /// Claims submitted by a user, newest first.
    pub async fn find_by_claimer(
        claimer_id: UserId,
        pool: &PgPool,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ClaimRecord>(
            "SELECT * FROM claims WHERE claimer_id = $1 ORDER BY created_at DESC",
        )
        .bind(claimer_id)
        .fetch_all(pool)
        .await
    }

    /// Claims against a single post, newest first.
    pub async fn find_for_post(post_id: PostId, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ClaimRecord>(
            "SELECT * FROM claims WHERE post_id = $1 ORDER BY created_at DESC",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }

    /// Claims against any post owned by `owner_id`, newest first.
    pub async fn find_for_owner(owner_id: UserId, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, ClaimRecord>(
            r#"
            SELECT c.* FROM claims c
            JOIN posts p ON p.id = c.post_id
            WHERE p.user_id = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(pool)
        .await
    }

    pub fn status_enum(&self) -> Result<ClaimStatus> {
        self.status.parse()
    }
}
