use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::UserId;

/// User - profile row keyed by the auth collaborator's principal id.
///
/// Names are best-effort, derived from OAuth metadata or the email local
/// part, and may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Find user by ID
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Find user by email (covers a row pre-created under a different id)
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        let user = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(user)
    }

    /// Create a new user row
    pub async fn create(
        id: UserId,
        email: &str,
        first_name: Option<String>,
        last_name: Option<String>,
        pool: &PgPool,
    ) -> Result<Self> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, email, first_name, last_name)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    /// Fill in missing name fields.
    ///
    /// NULLIF/COALESCE keeps existing non-empty values: blanks never
    /// overwrite previously populated names.
    pub async fn patch_names(
        id: UserId,
        first_name: Option<String>,
        last_name: Option<String>,
        pool: &PgPool,
    ) -> Result<Self> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET first_name = COALESCE(NULLIF(first_name, ''), NULLIF($2, '')),
                last_name = COALESCE(NULLIF(last_name, ''), NULLIF($3, '')),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    /// Apply a profile edit.
    ///
    /// Unlike `patch_names`, submitted non-empty names replace the stored
    /// ones; empty or absent fields leave the row untouched.
    pub async fn update_profile(
        id: UserId,
        first_name: Option<String>,
        last_name: Option<String>,
        avatar_url: Option<String>,
        pool: &PgPool,
    ) -> Result<Self> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users
            SET first_name = COALESCE(NULLIF($2, ''), first_name),
                last_name = COALESCE(NULLIF($3, ''), last_name),
                avatar_url = COALESCE($4, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(first_name)
        .bind(last_name)
        .bind(avatar_url)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    /// Re-key a row found by email to the principal's id.
    pub async fn rekey(old_id: UserId, new_id: UserId, pool: &PgPool) -> Result<Self> {
        let user = sqlx::query_as::<_, UserRecord>(
            "UPDATE users SET id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(old_id)
        .bind(new_id)
        .fetch_one(pool)
        .await?;
        Ok(user)
    }

    /// Display name for message composition ("Jane", or the email as fallback)
    pub fn display_name(&self) -> String {
        match self.first_name.as_deref() {
            Some(first) if !first.is_empty() => first.to_string(),
            _ => self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_first_name() {
        let user = UserRecord {
            id: UserId::new(),
            email: "jane.doe@example.com".to_string(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(user.display_name(), "Jane");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let user = UserRecord {
            id: UserId::new(),
            email: "jane.doe@example.com".to_string(),
            first_name: None,
            last_name: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(user.display_name(), "jane.doe@example.com");
    }
}
