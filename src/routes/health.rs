//! Liveness and readiness probes for container orchestration.
//!
//! Both probes only prove the process can answer HTTP. Readiness has access to
//! the processor but does not gate on it yet, so it never reports not-ready.

use axum::extract::State;

use crate::state::AppState;

/// Liveness probe handler.
pub async fn health() -> &'static str {
    "healthy"
}

/// Readiness probe handler.
pub async fn ready(State(_state): State<AppState>) -> &'static str {
    "ready"
}
