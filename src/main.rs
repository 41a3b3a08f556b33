//! log-processor entry point.
//!
//! Parses command line flags, layers configuration (defaults, optional TOML
//! file, environment, flags), initializes tracing on stderr, and hands control
//! to the supervisor until a termination signal arrives.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use log_processor::config::{
    get_env, AppConfig, LogFormat, DEFAULT_LOG_FILTER, ENV_LOG_FILTER, SHUTDOWN_TIMEOUT_SECS,
    WORKER_TICK_INTERVAL_SECS,
};
use log_processor::server::listen_for_signals;
use log_processor::{AppError, Supervisor};

/// Log processing service with health, readiness and metrics probes
#[derive(Parser, Debug)]
#[command(name = "log-processor", version, about)]
struct Args {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "log_processor=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// HTTP listener port (overrides config file and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

fn init_tracing(filter: &str, format: LogFormat) {
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Configuration priority: CLI > env > file > defaults
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    config.apply_overrides(args.port)?;

    let log_filter = args
        .log_level
        .unwrap_or_else(|| get_env(ENV_LOG_FILTER, DEFAULT_LOG_FILTER));
    init_tracing(&log_filter, config.logging.format);

    tracing::info!(
        listen = %config.listen_addr(),
        tick_interval_secs = WORKER_TICK_INTERVAL_SECS,
        shutdown_timeout_secs = SHUTDOWN_TIMEOUT_SECS,
        "Loaded configuration"
    );

    let supervisor = Supervisor::new(config).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to create processor");
    })?;

    let signals = listen_for_signals().map_err(AppError::Signal)?;

    supervisor.run(signals).await
}
