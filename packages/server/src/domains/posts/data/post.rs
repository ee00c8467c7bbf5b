//! GraphQL data types for posts.

use serde::{Deserialize, Serialize};

use crate::domains::posts::models::{PostRecord, TimeRange};

/// GraphQL-friendly representation of a post
#[derive(Debug, Clone, Serialize, Deserialize, juniper::GraphQLObject)]
#[graphql(description = "A lost or found item post")]
pub struct PostData {
    /// Unique identifier
    pub id: String,

    /// Owner of the post
    pub user_id: String,

    /// Item title
    pub title: String,

    /// Item description
    pub description: String,

    /// Free-text location
    pub location: String,

    /// Optional coordinates from the location picker
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Public URL of the item photo
    pub image_url: Option<String>,

    /// Status: active, claimed, resolved
    pub status: String,

    /// Approved claimant, set while status is `claimed`
    pub claimer_id: Option<String>,

    /// When the post was created (ISO 8601)
    pub created_at: String,
}

impl From<PostRecord> for PostData {
    fn from(p: PostRecord) -> Self {
        Self {
            id: p.id.to_string(),
            user_id: p.user_id.to_string(),
            title: p.title,
            description: p.description,
            location: p.location,
            latitude: p.latitude,
            longitude: p.longitude,
            image_url: p.image_url,
            status: p.status,
            claimer_id: p.claimer_id.map(|id| id.to_string()),
            created_at: p.created_at.to_rfc3339(),
        }
    }
}

/// Inline photo upload (base64 payload plus content type)
#[derive(Debug, Clone, juniper::GraphQLInputObject)]
pub struct PhotoInput {
    /// Base64-encoded file contents
    pub data_base64: String,
    /// MIME type, e.g. image/jpeg
    pub content_type: String,
}

/// Input for creating a post
#[derive(Debug, Clone, juniper::GraphQLInputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo: Option<PhotoInput>,
}

/// Recency window for listings
#[derive(Debug, Clone, Copy, juniper::GraphQLEnum)]
pub enum TimeRangeData {
    OneDay,
    SevenDays,
    Older,
}

impl From<TimeRangeData> for TimeRange {
    fn from(r: TimeRangeData) -> Self {
        match r {
            TimeRangeData::OneDay => TimeRange::OneDay,
            TimeRangeData::SevenDays => TimeRange::SevenDays,
            TimeRangeData::Older => TimeRange::Older,
        }
    }
}
