//! HTTP listener and termination signal handling.
//!
//! The listener is driven by an `axum_server::Handle` so the supervisor can
//! request a graceful shutdown with a bounded drain window. Termination
//! signals are delivered on a bounded channel.

mod listener;
mod shutdown;

pub use listener::{parse_listen_addr, start_server, ServerError};
pub use shutdown::{listen_for_signals, ShutdownSignal};
