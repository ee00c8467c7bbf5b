//! GraphQL client for integration tests.
//!
//! Runs operations straight against the schema, skipping the HTTP layer.

use std::sync::Arc;

use juniper::Variables;
use serde_json::Value;
use sqlx::PgPool;

use foundly_core::common::UserId;
use foundly_core::domains::identity::AuthPrincipal;
use foundly_core::kernel::ServerDeps;
use foundly_core::server::graphql::{create_schema, GraphQLContext, Schema};
use foundly_core::server::middleware::AuthUser;

pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// Data plus flattened error messages from one execution.
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Option<Value>,
    pub errors: Vec<String>,
}

impl GraphQLResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Panics on errors, otherwise hands back the data.
    pub fn unwrap(self) -> Value {
        assert!(self.errors.is_empty(), "GraphQL errors: {:?}", self.errors);
        self.data.expect("no data in response")
    }

    /// Walks a dotted path into the data, e.g. `result.get("post.title")`.
    pub fn get(&self, path: &str) -> Value {
        let data = self.data.as_ref().expect("no data in response");
        path.split('.').fold(data, |node, key| &node[key]).clone()
    }
}

impl GraphQLClient {
    /// A client with no authenticated user.
    pub fn new(db_pool: PgPool, deps: Arc<ServerDeps>) -> Self {
        Self {
            schema: create_schema(),
            context: GraphQLContext::new(db_pool, deps, None),
        }
    }

    /// A client acting as the given user, as if a valid token had been
    /// presented.
    pub fn with_auth_user(
        db_pool: PgPool,
        deps: Arc<ServerDeps>,
        user_id: uuid::Uuid,
        email: &str,
    ) -> Self {
        let auth_user = AuthUser {
            principal: AuthPrincipal {
                id: UserId::from_uuid(user_id),
                email: email.to_string(),
                given_name: None,
                family_name: None,
                full_name: None,
            },
        };
        Self {
            schema: create_schema(),
            context: GraphQLContext::new(db_pool, deps, Some(auth_user)),
        }
    }

    pub async fn execute(&self, query: &str) -> GraphQLResult {
        let (value, errors) = juniper::execute(
            query,
            None,
            &self.schema,
            &Variables::new(),
            &self.context,
        )
        .await
        .expect("GraphQL execution failed");

        GraphQLResult {
            data: Some(serde_json::to_value(&value).expect("unserializable GraphQL value")),
            errors: errors
                .iter()
                .map(|e| e.error().message().to_string())
                .collect(),
        }
    }
}
