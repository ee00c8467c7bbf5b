//! Error taxonomy for the claim lifecycle.
//!
//! Each variant maps to a distinct user-facing message; callers match on
//! the variant rather than parsing strings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("You already have a pending claim on this post")]
    DuplicateClaim,

    #[error("This post is no longer open for claims")]
    PostNotClaimable,

    #[error("This claim has already been decided")]
    ClaimNotPending,

    #[error("Claim not found")]
    NotFound,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Photo upload failed: {0}")]
    Upload(String),

    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ClaimError {
    /// Stable machine-readable code exposed in GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            ClaimError::Validation(_) => "VALIDATION",
            ClaimError::DuplicateClaim => "DUPLICATE_CLAIM",
            ClaimError::PostNotClaimable => "POST_NOT_CLAIMABLE",
            ClaimError::ClaimNotPending => "CLAIM_NOT_PENDING",
            ClaimError::NotFound => "NOT_FOUND",
            ClaimError::PermissionDenied(_) => "PERMISSION_DENIED",
            ClaimError::Upload(_) => "UPLOAD_FAILED",
            ClaimError::Persistence(_) => "PERSISTENCE",
            ClaimError::Internal(_) => "INTERNAL",
        }
    }

    /// Conversion for GraphQL edges; the code lands in error extensions.
    pub fn into_field_error(self) -> juniper::FieldError {
        let code = self.code();
        juniper::FieldError::new(self.to_string(), juniper::graphql_value!({ "code": code }))
    }
}
