//! Request ID middleware for correlating logs with requests.
//!
//! Reuses the caller's `x-request-id` when it is a valid UUID (so an ingress
//! or scraper can correlate its own logs), otherwise generates a UUID v4. The
//! ID is attached to a tracing span wrapping the request and echoed back on
//! the response.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use http::header::HeaderValue;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::REQUEST_ID_HEADER;

/// Request ID stored in request extensions.
#[derive(Clone, Copy, Debug)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Take the ID from the incoming headers, or generate a fresh one.
    fn from_request(request: &Request) -> Self {
        let incoming = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| Uuid::parse_str(value).ok());
        Self(incoming.unwrap_or_else(Uuid::new_v4))
    }
}

/// Middleware that assigns a request ID and runs the request inside a span.
///
/// Must be the outermost layer so the span covers all other middleware.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let request_id = RequestId::from_request(&request);
    let span = tracing::info_span!(
        "request",
        request_id = %request_id.0,
        method = %request.method(),
        path = %request.uri().path(),
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();
    request.extensions_mut().insert(request_id);

    async move {
        let mut response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        // Probes are scraped every few seconds; keep them out of info logs
        tracing::debug!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        if let Ok(value) = HeaderValue::from_str(&request_id.0.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}
