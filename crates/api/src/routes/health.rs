use axum::extract::State;
use axum::{routing::get, Json, Router};
use bizdesk_core::lifecycle::EntityStore;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the entity store answers.
    pub db_healthy: bool,
}

/// GET /health -- returns service and database health.
async fn health_check<S: EntityStore>(State(state): State<AppState<S>>) -> Json<HealthResponse> {
    let db_healthy = match state.engine.store().ping().await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the entity store");
            false
        }
    };

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router<S: EntityStore>() -> Router<AppState<S>> {
    Router::new().route("/health", get(health_check::<S>))
}
