//! GraphQL data types for users.

use serde::{Deserialize, Serialize};

use crate::domains::identity::models::UserRecord;
use crate::domains::posts::data::PhotoInput;

/// GraphQL-friendly representation of a user profile
#[derive(Debug, Clone, Serialize, Deserialize, juniper::GraphQLObject)]
#[graphql(description = "A community member profile")]
pub struct UserData {
    /// Unique identifier (assigned by the auth collaborator)
    pub id: String,

    /// Email address
    pub email: String,

    /// Best-effort first name
    pub first_name: Option<String>,

    /// Best-effort last name
    pub last_name: Option<String>,

    /// Public URL of the profile picture
    pub avatar_url: Option<String>,

    /// When the profile was created (ISO 8601)
    pub created_at: String,
}

/// Input for editing the current user's profile
#[derive(Debug, Clone, juniper::GraphQLInputObject)]
pub struct UpdateProfileInput {
    /// New first name; empty or absent leaves the stored name
    pub first_name: Option<String>,

    /// New last name; empty or absent leaves the stored name
    pub last_name: Option<String>,

    /// New profile picture
    pub photo: Option<PhotoInput>,
}

impl From<UserRecord> for UserData {
    fn from(u: UserRecord) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
            avatar_url: u.avatar_url,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}
