//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly. Emails are unique per
//! call because all tests share one database.

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use foundly_core::common::{PostId, UserId};
use foundly_core::domains::identity::models::UserRecord;
use foundly_core::domains::posts::models::PostRecord;

/// Create a test user with a unique email.
pub async fn create_test_user(pool: &PgPool, first_name: &str) -> Result<UserRecord> {
    let id = UserId::from_uuid(Uuid::new_v4());
    let email = format!("{}.{}@example.com", first_name.to_lowercase(), id);
    UserRecord::create(id, &email, Some(first_name.to_string()), None, pool).await
}

/// Create an active test post owned by `owner_id`.
pub async fn create_test_post(pool: &PgPool, owner_id: UserId, title: &str) -> Result<PostId> {
    let post = PostRecord::create(
        owner_id,
        title,
        "Lost near the park entrance",
        "Loring Park, Minneapolis",
        None,
        None,
        None,
        pool,
    )
    .await?;
    Ok(post.id)
}
