//! Periodic worker loop.
//!
//! Every tick the worker logs the current count and records one processing
//! event for its key. Missed ticks are delayed rather than replayed, and
//! cancellation between ticks returns without a final event. A failed record
//! is logged and the loop keeps ticking.

use std::sync::atomic::Ordering;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use crate::config::{WORKER_TICK_INTERVAL, WORKER_TICK_INTERVAL_SECS};

use super::{LogProcessor, ProcessorError};

impl LogProcessor {
    /// Run the worker loop until `shutdown` is cancelled, recording one event
    /// for `log_key` per tick.
    ///
    /// Only one worker may run per handle; a second concurrent call returns
    /// [`ProcessorError::AlreadyRunning`].
    #[instrument(name = "processor.worker", skip_all, fields(key = %log_key))]
    pub async fn start(&self, log_key: &str, shutdown: CancellationToken) -> Result<(), ProcessorError> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(ProcessorError::AlreadyRunning);
        }

        // First tick fires one full period after start
        let mut ticker = interval_at(
            Instant::now() + WORKER_TICK_INTERVAL,
            WORKER_TICK_INTERVAL,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        self.active.set(1);
        tracing::info!(interval_secs = WORKER_TICK_INTERVAL_SECS, "Processor started");

        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    tracing::info!("Shutting down processor");
                    break;
                }
                _ = ticker.tick() => {
                    tracing::info!(processed = self.processed_count(), "Processing logs");
                    if let Err(e) = self.process_log(log_key) {
                        tracing::warn!(error = %e, "Failed to record processing event");
                    }
                }
            }
        }

        self.active.set(0);
        self.running.store(false, Ordering::Release);
        Ok(())
    }
}
