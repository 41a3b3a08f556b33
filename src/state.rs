//! Shared application state for request handlers.

use std::sync::Arc;

use crate::processor::LogProcessor;

/// Shared application state, cloneable across handlers.
///
/// Holds the processor handle so the probes read the same counter the worker
/// writes.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<LogProcessor>,
}

impl AppState {
    /// Creates a new application state around the given processor handle.
    pub fn new(processor: Arc<LogProcessor>) -> Self {
        Self { processor }
    }
}
