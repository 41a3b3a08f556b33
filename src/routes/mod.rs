//! HTTP route handlers for the operational probes.
//!
//! Every route answers any method, never reads the request body, and always
//! responds 200. Responses are marked uncacheable so intermediaries never
//! serve a stale probe result.

pub mod health;
pub mod metrics;

use axum::{middleware, routing::any, Router};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::CACHE_CONTROL_PROBES;
use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router serving `/health`, `/ready` and `/metrics`.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", any(health::health))
        .route("/ready", any(health::ready))
        .route("/metrics", any(metrics::metrics))
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_PROBES),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::REQUEST_ID_HEADER;
    use crate::processor::LogProcessor;

    fn test_app() -> (Router, AppState) {
        let state = AppState::new(LogProcessor::new().unwrap());
        (create_router(state.clone()), state)
    }

    async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, http::HeaderMap, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _) = test_app();
        let (status, _, body) = send(app, Method::GET, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "healthy");
    }

    #[tokio::test]
    async fn test_ready_endpoint() {
        let (app, _) = test_app();
        let (status, _, body) = send(app, Method::GET, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ready");
    }

    #[tokio::test]
    async fn test_metrics_endpoint_reads_shared_counter() {
        let (app, state) = test_app();
        state.processor.process_log("router").unwrap();
        state.processor.process_log("router").unwrap();

        let (status, headers, body) = send(app, Method::GET, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers.get(http::header::CONTENT_TYPE).unwrap(),
            prometheus::TEXT_FORMAT
        );
        assert!(body.contains(
            "# HELP logs_processed_total Total number of logs processed\n\
             # TYPE logs_processed_total counter\n\
             logs_processed_total 2\n"
        ));
    }

    #[tokio::test]
    async fn test_method_is_not_restricted() {
        let (app, _) = test_app();
        let (status, _, body) = send(app.clone(), Method::POST, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "healthy");

        let (status, _, body) = send(app, Method::DELETE, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ready");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (app, _) = test_app();
        let (status, _, _) = send(app, Method::GET, "/logs").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_probe_headers() {
        let (app, _) = test_app();
        let (_, headers, _) = send(app, Method::GET, "/health").await;
        assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "no-store");
        let request_id = headers.get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(request_id).is_ok());
    }

    #[tokio::test]
    async fn test_incoming_request_id_is_echoed() {
        let (app, _) = test_app();
        let id = "0b6f1d2e-4a5c-4f3b-9e7d-2c1a0b9f8e7d";
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .header(REQUEST_ID_HEADER, id)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), id);
    }
}
