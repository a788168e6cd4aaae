//! Structured logging setup.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured logging with environment-based filtering.
///
/// Logs are always written to stdout as JSON. When `log_dir` is set (the
/// container bind-mounts its log volume at `/var/log/etl`), an additional
/// JSON layer appends to `imds-etl.log` inside that directory.
///
/// # Arguments
/// * `log_level` - Optional log level override (e.g., "info", "debug", "error")
/// * `log_dir` - Optional directory for the append-mode log file
pub fn init_logging(log_level: Option<&str>, log_dir: Option<&Path>) -> anyhow::Result<()> {
    let filter = if let Some(level) = log_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json());

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("imds-etl.log"))?;
        registry
            .with(fmt::layer().json().with_ansi(false).with_writer(Arc::new(file)))
            .init();
    } else {
        registry.init();
    }

    Ok(())
}
