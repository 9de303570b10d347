//! Logging system initialization
//!
//! Console (or file) output goes through a non-blocking `fmt` layer filtered
//! by `logging.level`. Events from this crate are additionally forwarded to
//! the diagnostic log, filtered by `diagnostics.level` independently.

use std::io::Write;
use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use super::diagnostics::{DiagnosticLayer, DiagnosticLog};
use crate::config::StaticConfig;
use crate::errors::{PocketlinkError, Result};

/// Target prefix of every event emitted by this crate.
pub const CRATE_TARGET: &str = "pocketlink";

/// Initialize logging system based on configuration
///
/// Call once at startup, after the configuration has been loaded. The
/// returned guard must stay alive until exit so buffered lines get flushed.
/// `RUST_LOG` overrides `logging.level` when set.
pub fn init_logging(
    config: &StaticConfig,
    diagnostics: Option<Arc<DiagnosticLog>>,
) -> Result<WorkerGuard> {
    let log_file = config
        .logging
        .file
        .as_deref()
        .filter(|f| !f.trim().is_empty());

    let writer: Box<dyn Write + Send + Sync> = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    PocketlinkError::logging(format!("无法打开日志文件 {}: {}", path, e))
                })?;
            Box::new(file)
        }
        // stdout 留给命令输出
        None => Box::new(std::io::stderr()),
    };
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.logging.level).map_err(|e| {
            PocketlinkError::logging(format!(
                "Invalid log level '{}': {}",
                config.logging.level, e
            ))
        })?,
    };

    let fmt_layer = if config.logging.format == "json" {
        fmt::layer()
            .json()
            .with_writer(non_blocking_writer)
            .with_filter(filter)
            .boxed()
    } else {
        fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(log_file.is_none())
            .with_level(true)
            .with_filter(filter)
            .boxed()
    };

    let diagnostic_layer = match diagnostics {
        Some(log) => Some(
            DiagnosticLayer::new(log)
                .with_filter(diagnostic_targets(&config.diagnostics.level)?),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(diagnostic_layer)
        .try_init()
        .map_err(|e| PocketlinkError::logging(format!("Logging already initialized: {}", e)))?;

    Ok(guard)
}

/// Only this crate's own events reach the diagnostic log.
pub fn diagnostic_targets(level: &str) -> Result<Targets> {
    let level: LevelFilter = level.parse().map_err(|_| {
        PocketlinkError::logging(format!("Invalid diagnostics level '{}'", level))
    })?;
    Ok(Targets::new().with_target(CRATE_TARGET, level))
}
