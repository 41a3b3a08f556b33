//! log-processor: a log processing service skeleton for container orchestrators.
//!
//! Serves liveness, readiness and Prometheus metrics probes while a background
//! worker records processing events on a fixed interval. The [`supervisor`]
//! ties both to OS termination signals and drains the listener on shutdown.

pub mod config;
pub mod error;
pub mod middleware;
pub mod processor;
pub mod routes;
pub mod server;
pub mod state;
pub mod supervisor;

pub use error::AppError;
pub use supervisor::Supervisor;
