//! Diagnostic logging to stderr.
//!
//! Library code only uses the `log` macros. The binary installs the
//! backend once, at the level from `RUST_LOG` or the config file.

use crate::errors::{AppError, AppResult};
use flexi_logger::{Logger, LoggerHandle, WriteMode};
use log::debug;
use std::sync::OnceLock;

static LOGGER: OnceLock<LoggerHandle> = OnceLock::new();

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Accepts the `log` level names, case-insensitive.
pub fn normalize_level(level: &str) -> AppResult<&'static str> {
    let wanted = level.trim().to_ascii_lowercase();
    LEVELS
        .iter()
        .find(|l| **l == wanted)
        .copied()
        .ok_or_else(|| AppError::Config(format!("unsupported log level '{level}'")))
}

/// Start the logger. Later calls are no-ops.
pub fn init_logging(level: &str) -> AppResult<()> {
    if LOGGER.get().is_some() {
        return Ok(());
    }

    let level = normalize_level(level)?;
    let handle = Logger::try_with_env_or_str(level)
        .map_err(|e| AppError::Config(format!("invalid log spec '{level}': {e}")))?
        .log_to_stderr()
        .write_mode(WriteMode::Direct)
        .format(flexi_logger::default_format)
        .start()
        .map_err(|e| AppError::Other(format!("failed to start logger: {e}")))?;

    // lost race: the other handle stays active
    let _ = LOGGER.set(handle);
    debug!("logging started at level {level}");
    Ok(())
}
