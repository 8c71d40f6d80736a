// src/logging.rs

//! Logging setup for `sitesync` using `tracing` + `tracing-subscriber`.
//!
//! The level comes from the `--log-level` CLI flag when given, then the
//! `SITESYNC_LOG` environment variable, then defaults to `info`.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise the global logging subscriber. Call once at startup; a second
/// call panics inside `tracing-subscriber`.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    let level = cli_level.map(Level::from).unwrap_or_else(|| {
        std::env::var("SITESYNC_LOG")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(Level::INFO)
    });

    fmt().with_max_level(level).with_target(true).init();

    Ok(())
}

impl From<LogLevel> for Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
