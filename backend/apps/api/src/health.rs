//! Health Endpoints

use axum::{Router, extract::State, routing::get};
use kernel::error::app_error::{AppError, AppResult};
use kernel::response::Envelope;
use serde_json::{Value, json};
use sqlx::PgPool;

/// GET /health
pub async fn liveness() -> Envelope<Value> {
    Envelope::new(json!({ "status": "ok" }))
}

/// GET /health/ready
pub async fn readiness(State(pool): State<PgPool>) -> AppResult<Envelope<Value>> {
    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Readiness check failed");
            AppError::service_unavailable("Database unavailable")
        })?;

    Ok(Envelope::new(json!({ "status": "ready" })))
}

/// Readiness route bound to the database pool
pub fn readiness_router(pool: PgPool) -> Router {
    Router::new()
        .route("/health/ready", get(readiness))
        .with_state(pool)
}
