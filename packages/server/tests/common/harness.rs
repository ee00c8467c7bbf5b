//! Integration test harness built on testcontainers.
//!
//! One Postgres container serves the whole test run. It starts and gets
//! migrated on the first test; after that each test only opens a pool and
//! builds its own dependency container with in-memory storage.

use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

use foundly_core::domains::identity::JwtService;
use foundly_core::kernel::{ChatHub, MemoryStorageService, ServerDeps};

use super::GraphQLClient;

struct SharedTestInfra {
    db_url: String,
    // Dropping the container would kill the database mid-run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_INFRA: OnceCell<SharedTestInfra> = OnceCell::const_new();

impl SharedTestInfra {
    async fn init() -> Result<Self> {
        // try_init tolerates another test module getting here first
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let postgres = Postgres::default()
            .with_tag("16")
            .with_cmd(["-c", "max_connections=200"])
            .start()
            .await
            .context("failed to start Postgres container")?;

        let db_url = format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            postgres.get_host().await?,
            postgres.get_host_port_ipv4(5432).await?,
        );

        let pool = PgPool::connect(&db_url)
            .await
            .context("failed to connect for migrations")?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;

        Ok(Self {
            db_url,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_INFRA
            .get_or_init(|| async {
                Self::init().await.expect("test infrastructure failed to start")
            })
            .await
    }
}

/// Per-test context over the shared database.
///
/// The database is shared, so fixtures use unique emails and tests assert
/// on rows they created themselves. Storage and the chat hub are private to
/// each harness.
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let client = ctx.graphql();
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
    /// The storage fake, for upload assertions.
    pub storage: Arc<MemoryStorageService>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("failed to create test harness")
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let infra = SharedTestInfra::get().await;

        let db_pool = PgPool::connect(&infra.db_url)
            .await
            .context("failed to connect to test database")?;

        let storage = Arc::new(MemoryStorageService::new());
        let jwt_service = Arc::new(JwtService::new("test_secret", "test_issuer".to_string()));
        let deps = Arc::new(ServerDeps::new(
            db_pool.clone(),
            storage.clone(),
            jwt_service,
            ChatHub::new(),
        ));

        Ok(Self {
            db_pool,
            deps,
            storage,
        })
    }

    /// Harness whose storage fake rejects every upload with `message`.
    pub async fn with_failing_storage(message: &str) -> Result<Self> {
        let mut harness = Self::new().await?;
        let storage = Arc::new(MemoryStorageService::failing(message));
        harness.deps = Arc::new(ServerDeps::new(
            harness.db_pool.clone(),
            storage.clone(),
            harness.deps.jwt_service.clone(),
            ChatHub::new(),
        ));
        harness.storage = storage;
        Ok(harness)
    }

    pub fn graphql(&self) -> GraphQLClient {
        GraphQLClient::new(self.db_pool.clone(), self.deps.clone())
    }

    pub fn graphql_as(&self, user_id: uuid::Uuid, email: &str) -> GraphQLClient {
        GraphQLClient::with_auth_user(self.db_pool.clone(), self.deps.clone(), user_id, email)
    }
}
