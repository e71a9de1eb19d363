//! # Meter Reader
//!
//! Main entry point for reading a meter: owns the device handle and a decoder,
//! and turns "read one window, then decode it" into a single call. Scheduling
//! repeated reads is left to the caller.

use crate::config::MeterConfig;
use crate::error::SmlError;
use crate::reading::{DecodeReport, DecodeState, Reading, ReadingDecoder};
use crate::sml::frame::ChecksumPolicy;
use crate::sml::serial::SmlDeviceHandle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;
use tokio_serial::SerialStream;

/// A reading together with the time its window was read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterSample {
    pub taken_at: DateTime<Utc>,
    pub reading: Reading,
}

pub struct MeterReader<P = SerialStream> {
    handle: SmlDeviceHandle<P>,
    decoder: ReadingDecoder,
}

impl MeterReader<SerialStream> {
    /// Opens the configured serial device.
    pub async fn open(config: &MeterConfig) -> Result<Self, SmlError> {
        config.validate()?;
        let handle =
            SmlDeviceHandle::connect_with_config(&config.device, config.serial_config()).await?;
        Ok(MeterReader::new(handle, config.checksum_policy))
    }
}

impl<P: AsyncRead + Unpin> MeterReader<P> {
    pub fn new(handle: SmlDeviceHandle<P>, checksum_policy: ChecksumPolicy) -> Self {
        MeterReader {
            handle,
            decoder: ReadingDecoder::new(checksum_policy),
        }
    }

    /// Reads one window and decodes it.
    pub async fn read_sample(&mut self) -> Result<MeterSample, SmlError> {
        let window = self.handle.read_window().await?;
        let taken_at = Utc::now();
        let reading = self.decoder.decode(&window)?;
        Ok(MeterSample { taken_at, reading })
    }

    /// Reads one window and decodes it, keeping the skipped records.
    pub async fn read_report(&mut self) -> Result<DecodeReport, SmlError> {
        let window = self.handle.read_window().await?;
        self.decoder.decode_report(&window)
    }

    /// State reached by the last decode.
    pub fn decoder_state(&self) -> DecodeState {
        self.decoder.state()
    }
}
