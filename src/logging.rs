// src/logging.rs
//! Thin logging facade over `tracing` so call sites read the same everywhere.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LOG_DIRECTIVES: &str = "recruitai_dashboard=info,rocket::server=off";

/// `app_log!(info, "Loaded {} jobs", count)` forwards to the matching `tracing` macro.
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

/// JSON lines into `log_file`, truncated on startup.
pub fn init_file_logging(log_file: &Path) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file: {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(env_filter())
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Human-readable logs on stderr, used by the CLI so stdout stays clean for tables.
pub fn init_cli_logging() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("recruitai_dashboard=warn")),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
