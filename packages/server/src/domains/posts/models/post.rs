use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::common::{PostId, UserId};

/// Post - a lost or found item published by its owner.
///
/// Invariant (backed by a CHECK constraint): `claimer_id` is set if and only
/// if `status = 'claimed'`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostRecord {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub status: String, // 'active', 'claimed', 'resolved'
    pub claimer_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Post status enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    Active,
    Claimed,
    Resolved,
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PostStatus::Active => write!(f, "active"),
            PostStatus::Claimed => write!(f, "claimed"),
            PostStatus::Resolved => write!(f, "resolved"),
        }
    }
}

impl std::str::FromStr for PostStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "active" => Ok(PostStatus::Active),
            "claimed" => Ok(PostStatus::Claimed),
            "resolved" => Ok(PostStatus::Resolved),
            _ => Err(anyhow::anyhow!("Invalid post status: {}", s)),
        }
    }
}

/// Recency window for listings. The predicate runs in SQL, not client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    OneDay,
    SevenDays,
    Older,
}

// =============================================================================
// Post Queries
// =============================================================================

impl PostRecord {
    /// Find post by ID
    pub async fn find_by_id(id: PostId, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, PostRecord>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }

    /// Create a new post (starts `active`, no claimer)
    pub async fn create(
        user_id: UserId,
        title: &str,
        description: &str,
        location: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
        image_url: Option<String>,
        pool: &PgPool,
    ) -> Result<Self> {
        let post = sqlx::query_as::<_, PostRecord>(
            r#"
            INSERT INTO posts (id, user_id, title, description, location, latitude, longitude, image_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(PostId::new())
        .bind(user_id)
        .bind(title)
        .bind(description)
        .bind(location)
        .bind(latitude)
        .bind(longitude)
        .bind(image_url)
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Find posts within a recency window, newest first
    pub async fn find_in_range(range: TimeRange, pool: &PgPool) -> Result<Vec<Self>> {
        let sql = match range {
            TimeRange::OneDay => {
                "SELECT * FROM posts WHERE created_at >= NOW() - INTERVAL '1 day'
                 ORDER BY created_at DESC"
            }
            TimeRange::SevenDays => {
                "SELECT * FROM posts WHERE created_at >= NOW() - INTERVAL '7 days'
                 ORDER BY created_at DESC"
            }
            TimeRange::Older => {
                "SELECT * FROM posts WHERE created_at < NOW() - INTERVAL '7 days'
                 ORDER BY created_at DESC"
            }
        };
        let posts = sqlx::query_as::<_, PostRecord>(sql).fetch_all(pool).await?;
        Ok(posts)
    }

    /// Find all posts owned by a user, newest first
    pub async fn find_by_owner(user_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        let posts = sqlx::query_as::<_, PostRecord>(
            "SELECT * FROM posts WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Owner closes out a claimed post as resolved.
    ///
    /// Returns None if the post is not currently `claimed` or not owned by
    /// the caller.
    pub async fn mark_resolved(id: PostId, owner_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        let post = sqlx::query_as::<_, PostRecord>(
            r#"
            UPDATE posts
            SET status = 'resolved', claimer_id = NULL, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND status = 'claimed'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(pool)
        .await?;
        Ok(post)
    }

    /// Bind the approved claimant, inside the decision transaction. Guarded
    /// on `status = 'active'`; returns `None` if the post was claimed or
    /// resolved in the meantime.
    pub async fn mark_claimed(
        id: PostId,
        claimer_id: UserId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PostRecord>(
            r#"
            UPDATE posts
            SET status = 'claimed', claimer_id = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'active'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(claimer_id)
        .fetch_optional(&mut **tx)
        .await
    }

    /// Release a post back to `active`, inside the decision transaction.
    /// Only reverts when this claimant currently holds the post; a post
    /// reassigned to someone else is left alone.
    pub async fn release_claim(
        id: PostId,
        claimer_id: UserId,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, PostRecord>(
            r#"
            UPDATE posts
            SET status = 'active', claimer_id = NULL, updated_at = NOW()
            WHERE id = $1 AND status = 'claimed' AND claimer_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(claimer_id)
        .fetch_optional(&mut **tx)
        .await
    }

    pub fn status_enum(&self) -> Result<PostStatus> {
        self.status.parse()
    }
}
