//! # SML Error Handling
//!
//! This module defines the SmlError enum, which represents the different error
//! types that can occur in the sml-rs crate.
//!
//! Frame-level variants (`TransportError`, `IncompleteFrame`, `RecordParseFailure`,
//! `ChecksumMismatch`, `ChecksumUnavailable`) abort a decode. Record-level variants
//! (`UnknownIdentifier`, `RecordDecodeFailure`) are absorbed by the reading
//! aggregator and only reported.

use crate::util::hex::HexError;
use thiserror::Error;

/// Represents the different error types that can occur in the SML crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SmlError {
    /// The byte source did not deliver a full read window.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The hex text does not contain a complete transport frame.
    #[error("Incomplete SML frame (length {length})\nMessage:\n{content}")]
    IncompleteFrame { length: usize, content: String },

    /// The CRC trailer does not match the frame contents.
    #[error("Invalid checksum: expected 0x{expected:04X}, calculated 0x{calculated:04X}")]
    ChecksumMismatch { expected: u16, calculated: u16 },

    /// The read window ends before the CRC trailer of the frame.
    #[error("Checksum trailer missing from read window")]
    ChecksumUnavailable,

    /// Records could not be extracted, or a record did not match the record shape.
    #[error("Error parsing SML record: {0}")]
    RecordParseFailure(String),

    /// The record identifier is not in the catalogue.
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// The value payload of a record could not be decoded.
    #[error("Cannot decode value {payload:?}: {reason}")]
    RecordDecodeFailure { payload: String, reason: String },

    /// A frame payload does not fit between the transport markers.
    #[error("Frame payload too long: {length} bytes, at most {max} allowed")]
    PayloadTooLong { length: usize, max: usize },

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string")]
    InvalidHexString,

    /// The configuration could not be loaded or is incomplete.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SmlError {
    /// Returns true for errors that only affect a single record.
    pub fn is_record_level(&self) -> bool {
        matches!(
            self,
            SmlError::UnknownIdentifier(_) | SmlError::RecordDecodeFailure { .. }
        )
    }
}

impl From<HexError> for SmlError {
    fn from(_: HexError) -> Self {
        SmlError::InvalidHexString
    }
}

impl From<std::io::Error> for SmlError {
    fn from(err: std::io::Error) -> Self {
        SmlError::TransportError(err.to_string())
    }
}
