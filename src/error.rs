use std::io;

use crate::config::ConfigError;
use crate::processor::ProcessorError;
use crate::server::ServerError;

/// Fatal errors that end the process with a non-zero exit code.
///
/// Probe handlers never fail, so there is no HTTP mapping.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Processor(#[from] ProcessorError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("Failed to install signal handlers: {0}")]
    Signal(#[source] io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
