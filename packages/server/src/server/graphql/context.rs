use std::sync::Arc;

use juniper::{FieldError, FieldResult};
use sqlx::PgPool;

use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Shared resources plus the per-request authenticated user (when the
/// request carried a valid token).
#[derive(Clone)]
pub struct GraphQLContext {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(db_pool: PgPool, deps: Arc<ServerDeps>, auth_user: Option<AuthUser>) -> Self {
        Self {
            db_pool,
            deps,
            auth_user,
        }
    }

    /// The authenticated user, or an `AUTHENTICATION_REQUIRED` field error.
    pub fn require_auth(&self) -> FieldResult<&AuthUser> {
        self.auth_user.as_ref().ok_or_else(|| {
            FieldError::new(
                "Authentication required",
                juniper::graphql_value!({ "code": "AUTHENTICATION_REQUIRED" }),
            )
        })
    }
}
