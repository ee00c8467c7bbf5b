//! Typed ID definitions for all domain entities.

// Re-export the core Id type and version markers
pub use super::id::{Id, V4, V7};

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (community members).
pub struct User;

/// Marker type for Post entities (lost/found items).
pub struct Post;

/// Marker type for Claim entities (verification questionnaires).
pub struct Claim;

/// Marker type for Chat entities (owner/claimant threads).
pub struct Chat;

/// Marker type for Message entities.
pub struct Message;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
///
/// User IDs are assigned by the auth collaborator (the JWT `sub` claim), so
/// this is a V4 alias: we never mint them locally except in tests.
pub type UserId = Id<User, V4>;

/// Typed ID for Post entities.
pub type PostId = Id<Post>;

/// Typed ID for Claim entities.
pub type ClaimId = Id<Claim>;

/// Typed ID for Chat entities.
pub type ChatId = Id<Chat>;

/// Typed ID for Message entities.
pub type MessageId = Id<Message>;
