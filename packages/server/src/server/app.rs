//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use storage::{StorageOptions, StorageService};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::identity::JwtService;
use crate::kernel::{ChatHub, ServerDeps, StorageAdapter};
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::middleware::{jwt_auth_middleware, AuthUser};
use crate::server::routes::{
    chat_stream_handler, graphql_batch_handler, graphql_handler, graphql_playground,
    health_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
}

/// Middleware to create GraphQLContext per-request
async fn create_graphql_context(
    Extension(state): Extension<AxumAppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Auth user is populated by jwt_auth_middleware, when the token is valid
    let auth_user = request.extensions().get::<AuthUser>().cloned();

    let context = GraphQLContext::new(state.db_pool.clone(), state.deps.clone(), auth_user);
    request.extensions_mut().insert(context);

    next.run(request).await
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
    ));

    let storage = Arc::new(StorageAdapter::new(StorageService::new(StorageOptions {
        base_url: config.storage_url.clone(),
        api_key: config.storage_api_key.clone(),
    })));

    let deps = Arc::new(ServerDeps::new(
        pool.clone(),
        storage,
        jwt_service.clone(),
        ChatHub::new(),
    ));

    build_app_with_deps(pool, jwt_service, deps)
}

/// Router construction with an injected dependency container.
pub fn build_app_with_deps(
    pool: PgPool,
    jwt_service: Arc<JwtService>,
    deps: Arc<ServerDeps>,
) -> Router {
    let schema = Arc::new(create_schema());

    let app_state = AxumAppState {
        db_pool: pool,
        deps,
        jwt_service: jwt_service.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    // Rate limiting: 10 req/sec per IP with bursts of 20
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .expect("static rate limiter configuration"),
    );
    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    let jwt_service_for_middleware = jwt_service.clone();

    let mut router = Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/graphql/batch", post(graphql_batch_handler));

    // GraphQL playground only in debug builds (development)
    #[cfg(debug_assertions)]
    {
        router = router.route("/graphql", get(graphql_playground));
    }

    router
        .route("/health", get(health_handler))
        .route("/api/chats/:chat_id/stream", get(chat_stream_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(create_graphql_context))
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(rate_limit_layer)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(schema)
}
