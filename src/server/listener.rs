//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address '{addr}': {source}")]
    Address {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("HTTP server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("HTTP server stopped before shutdown was requested")]
    Stopped,
}

/// Parse a `host:port` listen address.
pub fn parse_listen_addr(addr: &str) -> Result<SocketAddr, ServerError> {
    addr.parse().map_err(|source| ServerError::Address {
        addr: addr.to_string(),
        source,
    })
}

/// Serve `app` on `addr` until `handle` requests shutdown.
///
/// Bind failures surface as [`ServerError::Server`]. Completion after a
/// requested shutdown is `Ok(())`.
pub async fn start_server(app: Router, addr: SocketAddr, handle: Handle) -> Result<(), ServerError> {
    tracing::info!(%addr, "Starting HTTP server");

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
