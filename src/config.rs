//! # Meter Configuration
//!
//! Settings for reading a meter, loadable from a JSON file such as
//!
//! ```json
//! {
//!     "device": "/dev/ttyUSB0",
//!     "loglevel": "info",
//!     "checksum_policy": "strict"
//! }
//! ```
//!
//! Every key except `device` is optional.

use crate::constants::{SML_FRAME_CRC_HEX_LEN, SML_FRAME_HEX_LEN};
use crate::error::SmlError;
use crate::sml::frame::ChecksumPolicy;
use crate::sml::serial::SerialConfig;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Serial port of the optical reading head on a typical install.
pub const DEFAULT_DEVICE: &str = "/dev/ttyUSB0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterConfig {
    pub device: String,
    #[serde(alias = "loglevel")]
    pub log_level: String,
    pub checksum_policy: ChecksumPolicy,
    pub baudrate: u32,
    pub timeout_ms: u64,
    pub read_window: usize,
}

impl Default for MeterConfig {
    fn default() -> Self {
        let serial = SerialConfig::default();
        MeterConfig {
            device: String::new(),
            log_level: "warn".to_string(),
            checksum_policy: ChecksumPolicy::default(),
            baudrate: serial.baudrate,
            timeout_ms: serial.timeout.as_millis() as u64,
            read_window: serial.read_window,
        }
    }
}

impl MeterConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, SmlError> {
        let config = Self::parse(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SmlError> {
        Self::from_json_str(&read_config(path.as_ref())?)
    }

    /// Reads a JSON config file that may leave `device` to the command line.
    ///
    /// Every other setting is validated; call [`MeterConfig::validate`] once the
    /// device is known.
    pub fn load_settings(path: impl AsRef<Path>) -> Result<Self, SmlError> {
        let config = Self::parse(&read_config(path.as_ref())?)?;
        config.validate_settings()?;
        Ok(config)
    }

    fn parse(json: &str) -> Result<Self, SmlError> {
        serde_json::from_str(json).map_err(|e| SmlError::ConfigError(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), SmlError> {
        if self.device.trim().is_empty() {
            return Err(SmlError::ConfigError("No device configured".to_string()));
        }
        self.validate_settings()
    }

    /// Validates everything except the device.
    pub fn validate_settings(&self) -> Result<(), SmlError> {
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(SmlError::ConfigError(format!(
                "Invalid log level: {}",
                self.log_level
            )));
        }
        if self.baudrate == 0 {
            return Err(SmlError::ConfigError("Baud rate must not be zero".to_string()));
        }
        // A window has to hold at least one frame with its CRC
        let min_window = (SML_FRAME_HEX_LEN + SML_FRAME_CRC_HEX_LEN) / 2;
        if self.read_window < min_window {
            return Err(SmlError::ConfigError(format!(
                "Read window of {} bytes is shorter than one frame ({min_window} bytes)",
                self.read_window
            )));
        }
        Ok(())
    }

    /// Serial settings for the reading head.
    pub fn serial_config(&self) -> SerialConfig {
        SerialConfig {
            baudrate: self.baudrate,
            timeout: Duration::from_millis(self.timeout_ms),
            read_window: self.read_window,
        }
    }
}

fn read_config(path: &Path) -> Result<String, SmlError> {
    std::fs::read_to_string(path)
        .map_err(|e| SmlError::ConfigError(format!("{}: {e}", path.display())))
}
