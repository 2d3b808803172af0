//! Health check endpoint

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}

/// Health check endpoint
///
/// Returns 200 OK if the server and database are healthy
async fn health_check(State(pool): State<SqlitePool>) -> Response {
    let db_status = match sqlx::query("SELECT 1").fetch_one(&pool).await {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    let response = HealthResponse {
        status: if db_status == "healthy" { "ok" } else { "degraded" }.to_string(),
        database: db_status.to_string(),
    };

    let status_code = if db_status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response)).into_response()
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
