//! Debug logging support
//!
//! The sequencer swallows per-source read errors by design, so the only
//! window into them is the trace stream. When debug mode is enabled the
//! runtime's events are appended to ~/.perlrt/perlrt.log; normal operation
//! never writes anywhere.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, registry};

/// Initialize file logging when debug mode is enabled.
///
/// Returns the path to the log file, or None if logging is not enabled.
/// Failure to open the log file falls back to no logging rather than
/// breaking the run.
pub fn init_debug_logging(debug_enabled: bool) -> Result<Option<PathBuf>> {
    if !debug_enabled {
        return Ok(None);
    }

    let log_path = get_log_path()?;

    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match file {
        Ok(log_file) => {
            let subscriber = registry()
                .with(
                    fmt::layer()
                        .with_writer(log_file)
                        .with_ansi(false)
                        .with_target(false),
                )
                .with(EnvFilter::new("perlrt=debug"));

            tracing::subscriber::set_global_default(subscriber)
                .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

            Ok(Some(log_path))
        }
        Err(e) => {
            eprintln!("Warning: Could not create log file: {}", e);
            Ok(None)
        }
    }
}

fn get_log_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(home_dir.join(".perlrt").join("perlrt.log"))
}
