//! Health check endpoint.
//!
//! Pings the database pool directly, bypassing the service layer, so a
//! load balancer sees the real connectivity.

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::pkg_version;
use crate::state::AppState;

pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(health_check))
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database = check_database(&state).await;
    let status = database.status;

    let response = HealthResponse {
        status,
        version: pkg_version().to_string(),
        database,
    };

    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(response))
}

async fn check_database(state: &AppState) -> ComponentHealth {
    use diesel_async::RunQueryDsl;

    let start_time = Instant::now();
    let elapsed = |start: Instant| start.elapsed().as_millis() as u64;

    match state.db_pool.get().await {
        Ok(mut conn) => match diesel::sql_query("SELECT 1").execute(&mut conn).await {
            Ok(_) => ComponentHealth {
                status: HealthStatus::Healthy,
                message: Some("Connected".to_string()),
                response_time_ms: elapsed(start_time),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Health query failed");
                ComponentHealth {
                    status: HealthStatus::Unhealthy,
                    message: Some("Query failed".to_string()),
                    response_time_ms: elapsed(start_time),
                }
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not get a connection");
            ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some("Connection failed".to_string()),
                response_time_ms: elapsed(start_time),
            }
        }
    }
}
