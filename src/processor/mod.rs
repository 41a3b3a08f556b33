//! Log processor handle.
//!
//! `LogProcessor` owns the processing counter and the active gauge reported on
//! `/metrics`, registered in a registry private to the handle. It is created
//! once at startup, shared by `Arc` between the background worker (see
//! [`worker`]) and the HTTP handlers, and lives until process exit. Metric
//! values are atomic so readers never block the worker.

mod entry;
mod worker;

pub use entry::LogEntry;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

const LOGS_PROCESSED: &str = "logs_processed_total";
const LOGS_PROCESSED_HELP: &str = "Total number of logs processed";

const ACTIVE_PROCESSORS: &str = "active_log_processors";
const ACTIVE_PROCESSORS_HELP: &str = "Number of active processors";

#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("Metrics output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Invalid log key: {0:?}")]
    InvalidKey(String),

    #[error("Processor worker is already running")]
    AlreadyRunning,
}

/// Shared processor handle.
pub struct LogProcessor {
    registry: Registry,
    processed: IntCounter,
    active: IntGauge,
    running: AtomicBool,
}

impl LogProcessor {
    /// Creates the processor handle shared by the worker and the probes.
    ///
    /// Fails if the metrics cannot be created or registered.
    pub fn new() -> Result<Arc<Self>, ProcessorError> {
        tracing::info!("Creating log processor");

        let registry = Registry::new();
        let processed = IntCounter::new(LOGS_PROCESSED, LOGS_PROCESSED_HELP)?;
        let active = IntGauge::new(ACTIVE_PROCESSORS, ACTIVE_PROCESSORS_HELP)?;
        registry.register(Box::new(processed.clone()))?;
        registry.register(Box::new(active.clone()))?;

        Ok(Arc::new(Self {
            registry,
            processed,
            active,
            running: AtomicBool::new(false),
        }))
    }

    /// Record one processing event for `log_key`.
    ///
    /// Increments the processed counter by exactly one.
    pub fn process_log(&self, log_key: &str) -> Result<(), ProcessorError> {
        if log_key.is_empty() {
            return Err(ProcessorError::InvalidKey(log_key.to_string()));
        }
        tracing::info!(key = %log_key, "Processing log");
        self.processed.inc();
        Ok(())
    }

    /// Snapshot of the number of processing events recorded so far.
    pub fn processed_count(&self) -> u64 {
        self.processed.get()
    }

    /// Whether the worker loop is currently running.
    pub fn is_active(&self) -> bool {
        self.active.get() > 0
    }

    /// Render all metrics in the Prometheus text exposition format.
    pub fn encode_metrics(&self) -> Result<String, ProcessorError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_processor_starts_at_zero() {
        let processor = LogProcessor::new().unwrap();
        assert_eq!(processor.processed_count(), 0);
        assert!(!processor.is_active());
    }

    #[test]
    fn test_process_log_increments_by_one() {
        let processor = LogProcessor::new().unwrap();
        processor.process_log("a").unwrap();
        assert_eq!(processor.processed_count(), 1);
        processor.process_log("b").unwrap();
        assert_eq!(processor.processed_count(), 2);
    }

    #[test]
    fn test_process_log_rejects_empty_key() {
        let processor = LogProcessor::new().unwrap();
        let err = processor.process_log("").unwrap_err();
        assert!(matches!(err, ProcessorError::InvalidKey(_)));
        assert_eq!(processor.processed_count(), 0);
    }

    #[test]
    fn test_handles_have_independent_registries() {
        let first = LogProcessor::new().unwrap();
        let second = LogProcessor::new().unwrap();
        first.process_log("first").unwrap();

        assert_eq!(first.processed_count(), 1);
        assert_eq!(second.processed_count(), 0);
    }

    #[test]
    fn test_encode_metrics_fresh_processor() {
        let processor = LogProcessor::new().unwrap();
        assert_eq!(
            processor.encode_metrics().unwrap(),
            "# HELP active_log_processors Number of active processors\n\
             # TYPE active_log_processors gauge\n\
             active_log_processors 0\n\
             # HELP logs_processed_total Total number of logs processed\n\
             # TYPE logs_processed_total counter\n\
             logs_processed_total 0\n"
        );
    }

    #[test]
    fn test_encode_metrics_reflects_processed_count() {
        let processor = LogProcessor::new().unwrap();
        for _ in 0..3 {
            processor.process_log("encode").unwrap();
        }
        let body = processor.encode_metrics().unwrap();
        assert!(body.contains(
            "# HELP logs_processed_total Total number of logs processed\n\
             # TYPE logs_processed_total counter\n\
             logs_processed_total 3\n"
        ));
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let processor = LogProcessor::new().unwrap();
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let processor = Arc::clone(&processor);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        processor.process_log("concurrent").unwrap();
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(processor.processed_count(), 8000);
    }

    #[test]
    fn test_reads_are_monotonic_while_writing() {
        let processor = LogProcessor::new().unwrap();
        let writer = {
            let processor = Arc::clone(&processor);
            std::thread::spawn(move || {
                for _ in 0..5000 {
                    processor.process_log("monotonic").unwrap();
                }
            })
        };

        let mut last = 0;
        while !writer.is_finished() {
            let current = processor.processed_count();
            assert!(current >= last, "counter went from {last} to {current}");
            last = current;
        }
        writer.join().unwrap();
        assert_eq!(processor.processed_count(), 5000);
    }
}
