//! Prometheus scrape endpoint.

use axum::{extract::State, response::IntoResponse};
use http::header::CONTENT_TYPE;
use prometheus::{Encoder, TextEncoder};

use crate::state::AppState;

/// Metrics scrape handler.
///
/// Always answers 200; an encoding failure is logged and yields an empty body.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.processor.encode_metrics().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to encode metrics");
        String::new()
    });

    (
        [(CONTENT_TYPE, TextEncoder::new().format_type().to_string())],
        body,
    )
}
