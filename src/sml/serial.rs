//! # SML Serial Communication
//!
//! The meter pushes SML transmissions over its optical interface without being
//! asked, so the transport side is read-only: open the port, read a window of
//! bytes large enough to contain at least one complete transmission, and hand it
//! to the decoder.
//!
//! [`SmlDeviceHandle`] is generic over the byte source. Production code uses
//! `tokio_serial::SerialStream`; tests plug in any `AsyncRead`.

use crate::constants::SML_READ_WINDOW_BYTES;
use crate::error::SmlError;
use crate::util::hex::format_hex_compact;
use log::{debug, info};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Configuration for serial connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub baudrate: u32,
    /// Upper bound for filling one read window.
    pub timeout: Duration,
    /// Bytes read per decode attempt.
    pub read_window: usize,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            baudrate: 9600,
            timeout: Duration::from_secs(10),
            read_window: SML_READ_WINDOW_BYTES,
        }
    }
}

/// Represents a handle to the meter's byte stream.
pub struct SmlDeviceHandle<P = SerialStream> {
    port: P,
    config: SerialConfig,
}

impl SmlDeviceHandle<SerialStream> {
    /// Opens the serial port with the default settings (9600 baud, 8N1).
    pub async fn connect(port_name: &str) -> Result<Self, SmlError> {
        Self::connect_with_config(port_name, SerialConfig::default()).await
    }

    /// Opens the serial port with custom config.
    pub async fn connect_with_config(
        port_name: &str,
        config: SerialConfig,
    ) -> Result<Self, SmlError> {
        let port = tokio_serial::new(port_name, config.baudrate)
            .data_bits(tokio_serial::DataBits::Eight)
            .stop_bits(tokio_serial::StopBits::One)
            .parity(tokio_serial::Parity::None)
            .timeout(config.timeout)
            .open_native_async()
            .map_err(|e| SmlError::TransportError(format!("{port_name}: {e}")))?;

        info!("Opened {port_name} at {} baud", config.baudrate);
        Ok(SmlDeviceHandle { port, config })
    }
}

impl<P: AsyncRead + Unpin> SmlDeviceHandle<P> {
    /// Wraps an already opened byte source.
    pub fn from_port(port: P, config: SerialConfig) -> Self {
        SmlDeviceHandle { port, config }
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// Reads exactly one window of `config.read_window` bytes.
    ///
    /// A short read (EOF, I/O error or timeout) is a `TransportError`; partial
    /// windows are never returned.
    pub async fn read_window(&mut self) -> Result<Vec<u8>, SmlError> {
        let mut buf = vec![0u8; self.config.read_window];
        tokio::time::timeout(self.config.timeout, self.port.read_exact(&mut buf))
            .await
            .map_err(|_| {
                SmlError::TransportError(format!(
                    "timed out after {:?} waiting for {} bytes",
                    self.config.timeout, self.config.read_window
                ))
            })??;

        debug!(
            "Read window of {} bytes: {} ...",
            buf.len(),
            format_hex_compact(&buf[..buf.len().min(16)])
        );
        Ok(buf)
    }
}
