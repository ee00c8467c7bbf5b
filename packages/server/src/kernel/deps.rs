//! Server dependencies for domain actions (using traits for testability)
//!
//! Central dependency container handed to every domain action and GraphQL
//! edge. External collaborators sit behind trait objects so tests can
//! substitute in-memory fakes.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::identity::JwtService;
use crate::kernel::{BaseStorageService, ChatHub};

/// Server dependencies accessible to actions
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Object storage for post images and claim-verification photos
    pub storage: Arc<dyn BaseStorageService>,
    /// JWT service for token verification (and creation in tests)
    pub jwt_service: Arc<JwtService>,
    /// In-process pub/sub hub for real-time chat delivery to SSE endpoints
    pub chat_hub: ChatHub,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        storage: Arc<dyn BaseStorageService>,
        jwt_service: Arc<JwtService>,
        chat_hub: ChatHub,
    ) -> Self {
        Self {
            db_pool,
            storage,
            jwt_service,
            chat_hub,
        }
    }
}
