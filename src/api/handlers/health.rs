//! Liveness and readiness probes.
//!
//! Mounted at the root, outside `/api/v1`, and never behind auth.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Reports the state of every dependency. Answers 503 when one is down.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = BTreeMap::new();
    checks.insert("database".to_string(), check_database(&state).await);

    let response = HealthResponse::from_checks(crate::pkg_version(), checks);
    let status = if response.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Ready to serve traffic"),
        (status = 503, description = "A dependency is unavailable")
    )
)]
async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    if check_database(&state).await.status == HealthStatus::Healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

#[utoipa::path(
    get,
    path = "/health/live",
    tag = HEALTH_TAG,
    responses((status = 200, description = "Process is alive"))
)]
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_database(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let elapsed = |start: Instant| start.elapsed().as_millis() as u64;

    let mut conn = match state.database.pool().get().await {
        Ok(conn) => conn,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not get a connection");
            return ComponentHealth::unhealthy(format!("Connection failed: {}", e), elapsed(start));
        }
    };

    match diesel::sql_query("SELECT 1").execute(&mut *conn).await {
        Ok(_) => ComponentHealth::healthy("Connected", elapsed(start)),
        Err(e) => {
            tracing::warn!(error = %e, "Health check query failed");
            ComponentHealth::unhealthy(format!("Query failed: {}", e), elapsed(start))
        }
    }
}
