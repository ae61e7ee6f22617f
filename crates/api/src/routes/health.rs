//! `GET /health`, mounted at the root rather than under `/api/v1`.
//!
//! Always answers `200 OK`. A missing database degrades the status; a
//! missing classifier key does not, since classification still returns
//! default suggestions without one.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `false` when no API key is set and every suggestion is the default.
    pub classifier_configured: bool,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match ticketdesk_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        classifier_configured: state.classifier.is_configured(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
