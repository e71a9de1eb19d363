//! # sml-rs - A Rust Crate for Reading SML (Smart Message Language) Meters
//!
//! German electricity meters (eHZ and similar) push SML transmissions over
//! their optical interface. The sml-rs crate reads those transmissions from a
//! serial reading head and decodes the energy and power values into a typed
//! [`Reading`].
//!
//! ## Features
//!
//! - Read fixed-size windows from a serial port (or any `AsyncRead`)
//! - Locate and validate SML transport frames, including the CRC-16 trailer
//! - Extract list entry records and decode them via a fixed OBIS catalogue
//! - Energy import/export (total, tariff 1, tariff 2) in kWh, active power
//!   (total and per phase) in W
//! - Support for logging and error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sml_rs::{MeterConfig, MeterReader};
//!
//! # async fn run() -> Result<(), sml_rs::SmlError> {
//! let config = MeterConfig {
//!     device: "/dev/ttyUSB0".to_string(),
//!     ..MeterConfig::default()
//! };
//! let mut reader = MeterReader::open(&config).await?;
//! let sample = reader.read_sample().await?;
//! println!("{:?}", sample.reading.energy_import_total);
//! # Ok(())
//! # }
//! ```
//!
//! Decoding a captured window needs no I/O at all:
//!
//! ```rust
//! use sml_rs::payload::record::{pack_record, TypeMarker};
//! use sml_rs::sml::frame::pack_frame;
//! use sml_rs::util::hex::decode_hex;
//! use sml_rs::{decode_reading, ChecksumPolicy};
//!
//! # fn main() -> Result<(), sml_rs::SmlError> {
//! let record = pack_record("0100010800", TypeMarker::EnergyWithStatus, 0x0517_E31B);
//! let window = pack_frame(&decode_hex(&record)?)?;
//!
//! let reading = decode_reading(&window, ChecksumPolicy::Strict)?;
//! assert_eq!(reading.energy_import_total, Some(8545));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod meter_reader;
pub mod payload;
pub mod reading;
pub mod sml;
pub mod util;

pub use crate::config::MeterConfig;
pub use crate::error::SmlError;
pub use crate::logging::{init_logger, init_logger_with_level, log_error, log_info};

// Core SML types
pub use meter_reader::{MeterReader, MeterSample};
pub use payload::{lookup, ReadingField, RecordDescriptor};
pub use reading::{decode_reading, DecodeReport, DecodeState, Reading, ReadingDecoder};
pub use sml::frame::ChecksumPolicy;
pub use sml::serial::{SerialConfig, SmlDeviceHandle};

/// Connect to an SML meter via serial port.
///
/// # Arguments
/// * `port` - Serial port path (e.g., "/dev/ttyUSB0" on Linux, "COM3" on Windows)
///
/// # Returns
/// * `Ok(SmlDeviceHandle)` - Connected device handle
/// * `Err(SmlError)` - Connection failed
pub async fn connect(port: &str) -> Result<SmlDeviceHandle, SmlError> {
    SmlDeviceHandle::connect(port).await
}

/// Read one window from the device and decode it.
///
/// # Arguments
/// * `handle` - Device handle to read from
/// * `checksum_policy` - How to treat the frame CRC
///
/// # Returns
/// * `Ok(Reading)` - Decoded reading
/// * `Err(SmlError)` - Transport or frame-level failure
pub async fn read_reading(
    handle: &mut SmlDeviceHandle,
    checksum_policy: ChecksumPolicy,
) -> Result<Reading, SmlError> {
    let window = handle.read_window().await?;
    decode_reading(&window, checksum_policy)
}
