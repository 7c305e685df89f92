//! File logging for the client binaries
//!
//! The terminal belongs to the board, so everything goes to a log file.
//! `UCHESS_LOG` takes an `EnvFilter` directive (default `info`); set it to
//! `trace` to see the raw UCI traffic.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default log file, created in the working directory
pub const LOG_FILE: &str = "uchess.log";

/// Environment variable holding the filter directive
pub const LOG_ENV: &str = "UCHESS_LOG";

/// Install the global subscriber, truncating `path`
pub fn init(path: &Path, default_level: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing log subscriber: {}", e))?;
    Ok(())
}
