//! Lifecycle supervisor.
//!
//! Owns the processor handle, runs the HTTP listener and the worker on
//! separate tasks, and turns the first termination signal into an ordered
//! shutdown: cancel the worker, then drain the listener within
//! [`SHUTDOWN_TIMEOUT`].

use std::sync::Arc;

use axum_server::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{AppConfig, SHUTDOWN_TIMEOUT, SHUTDOWN_TIMEOUT_SECS, SIMULATED_LOG_KEY};
use crate::error::AppError;
use crate::processor::LogProcessor;
use crate::routes::create_router;
use crate::server::{parse_listen_addr, start_server, ServerError, ShutdownSignal};
use crate::state::AppState;

pub struct Supervisor {
    config: AppConfig,
    processor: Arc<LogProcessor>,
    handle: Handle,
}

impl Supervisor {
    /// Construct the processor handle. Failure here is fatal.
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let processor = LogProcessor::new()?;
        Ok(Self {
            config,
            processor,
            handle: Handle::new(),
        })
    }

    /// Processor handle shared with the worker and the probes.
    pub fn processor(&self) -> Arc<LogProcessor> {
        Arc::clone(&self.processor)
    }

    /// Handle controlling the HTTP listener; `listening()` yields the bound address.
    pub fn server_handle(&self) -> Handle {
        self.handle.clone()
    }

    /// Run until a signal arrives on `signals`, then shut down.
    ///
    /// Returns an error only for fatal listener failures. A shutdown that
    /// overruns the drain window is logged and still returns `Ok(())`.
    pub async fn run(self, mut signals: mpsc::Receiver<ShutdownSignal>) -> Result<(), AppError> {
        let addr = parse_listen_addr(&self.config.listen_addr())?;
        let app = create_router(AppState::new(Arc::clone(&self.processor)));

        let mut server = tokio::spawn(start_server(app, addr, self.handle.clone()));

        let worker_token = CancellationToken::new();
        let worker = {
            let processor = Arc::clone(&self.processor);
            let token = worker_token.clone();
            tokio::spawn(async move {
                if let Err(e) = processor.start(SIMULATED_LOG_KEY, token).await {
                    tracing::error!(error = %e, "Processor error");
                }
            })
        };

        tokio::select! {
            received = signals.recv() => match received {
                Some(signal) => tracing::info!(%signal, "Received shutdown signal"),
                None => tracing::warn!("Signal channel closed, shutting down"),
            },
            result = &mut server => {
                worker_token.cancel();
                join_worker(worker).await;
                let err = match result {
                    Ok(Ok(())) => AppError::Server(ServerError::Stopped),
                    Ok(Err(e)) => AppError::Server(e),
                    Err(e) => AppError::Task(e),
                };
                tracing::error!(error = %err, "HTTP server error");
                return Err(err);
            }
        }

        worker_token.cancel();

        // Fresh deadline, independent of the worker token
        self.handle.graceful_shutdown(Some(SHUTDOWN_TIMEOUT));
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, server).await {
            Ok(Ok(Ok(()))) => tracing::info!("HTTP server stopped"),
            Ok(Ok(Err(e))) => tracing::error!(error = %e, "Server shutdown error"),
            Ok(Err(e)) => tracing::error!(error = %e, "Server shutdown error"),
            Err(_) => tracing::error!(
                timeout_secs = SHUTDOWN_TIMEOUT_SECS,
                "Server shutdown error: deadline exceeded"
            ),
        }

        join_worker(worker).await;

        tracing::info!("Shutdown complete");
        Ok(())
    }
}

/// Wait for the worker task, logging a panic instead of propagating it.
/// Returns whether the task finished cleanly.
async fn join_worker(worker: JoinHandle<()>) -> bool {
    match worker.await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Processor task failed");
            false
        }
    }
}
