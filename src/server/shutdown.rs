//! Termination signal handling.
//!
//! SIGINT and SIGTERM are forwarded onto a channel of capacity one. While a
//! signal is pending, further signals are dropped.

use std::fmt;

use tokio::sync::mpsc;

use crate::config::SIGNAL_CHANNEL_CAPACITY;

/// Termination signal received from the OS
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT / Ctrl+C
    Interrupt,
    /// SIGTERM
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// Subscribe to SIGINT and SIGTERM.
///
/// Handlers are installed before this returns, so a signal sent afterwards is
/// never lost to the default disposition.
#[cfg(unix)]
pub fn listen_for_signals() -> std::io::Result<mpsc::Receiver<ShutdownSignal>> {
    use tokio::signal::unix::{signal, SignalKind};
    use tokio::sync::mpsc::error::TrySendError;

    let (tx, rx) = mpsc::channel(SIGNAL_CHANNEL_CAPACITY);
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                Some(()) = interrupt.recv() => ShutdownSignal::Interrupt,
                Some(()) = terminate.recv() => ShutdownSignal::Terminate,
                else => break,
            };

            match tx.try_send(received) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    tracing::debug!(signal = %received, "Shutdown already pending, dropping signal");
                }
                Err(TrySendError::Closed(_)) => break,
            }
        }
    });

    Ok(rx)
}

/// Subscribe to Ctrl+C (SIGTERM does not exist on this platform).
#[cfg(not(unix))]
pub fn listen_for_signals() -> std::io::Result<mpsc::Receiver<ShutdownSignal>> {
    let (tx, rx) = mpsc::channel(SIGNAL_CHANNEL_CAPACITY);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = tx.send(ShutdownSignal::Interrupt).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            }
        }
    });

    Ok(rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_display() {
        assert_eq!(ShutdownSignal::Interrupt.to_string(), "SIGINT");
        assert_eq!(ShutdownSignal::Terminate.to_string(), "SIGTERM");
    }
}
