use crate::error::SmlError;
use log::{error, info, log_enabled, Level, LevelFilter};

/// Initializes the logger with the `env_logger` crate.
///
/// The level comes from `RUST_LOG`.
pub fn init_logger() {
    env_logger::init();
}

/// Initializes `env_logger` with a configured default level.
///
/// `RUST_LOG` still takes precedence when set.
///
/// # Examples
/// ```rust,no_run
/// use sml_rs::logging::init_logger_with_level;
///
/// init_logger_with_level("info").expect("Failed to initialize logging");
/// log::info!("System initialized");
/// ```
pub fn init_logger_with_level(level: &str) -> Result<(), SmlError> {
    let filter: LevelFilter = level
        .parse()
        .map_err(|_| SmlError::ConfigError(format!("Invalid log level: {level}")))?;

    env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .try_init()
        .map_err(|e| SmlError::ConfigError(e.to_string()))
}

/// Logs an error message.
pub fn log_error(message: &str) {
    if log_enabled!(Level::Error) {
        error!("{message}");
    }
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}
