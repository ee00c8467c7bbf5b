use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use std::time::Duration;

use crate::server::app::AxumAppState;

const DB_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize)]
pub struct HealthReport {
    healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    database_error: Option<String>,
    pool_size: u32,
    pool_idle: usize,
}

/// Pings the database and reports pool stats. 200 when the ping
/// succeeds within the timeout, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthReport>) {
    let ping = tokio::time::timeout(
        DB_PING_TIMEOUT,
        sqlx::query("SELECT 1").execute(&state.db_pool),
    )
    .await;

    let database_error = match ping {
        Ok(Ok(_)) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(format!("database ping timed out after {:?}", DB_PING_TIMEOUT)),
    };

    let report = HealthReport {
        healthy: database_error.is_none(),
        database_error,
        pool_size: state.db_pool.size(),
        pool_idle: state.db_pool.num_idle(),
    };
    let status = if report.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}
