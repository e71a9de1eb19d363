//! # SML Transport Frame Validation
//!
//! An SML transmission (transport protocol version 1) is wrapped in escape
//! sequences: `1B1B1B1B 01010101` opens it, `1B1B1B1B 1A xx` closes it, and two
//! CRC-16 bytes follow. The meters this crate targets always send a body of the
//! same size, so a complete frame has a fixed shape:
//!
//! ```text
//! 1B1B1B1B01010101 <886 hex digits> 001B1B1B1B1A00 <CRC, 4 hex digits>
//! ```
//!
//! Parsing uses the `nom` crate on the uppercase hex view of the read window.
//!
//! ## Usage
//!
//! ```rust
//! use sml_rs::sml::frame::{pack_frame, validate_frame, verify_frame};
//! use sml_rs::util::hex::encode_hex_upper;
//!
//! let bytes = pack_frame(&[0x76, 0x05]).unwrap();
//! let hex = encode_hex_upper(&bytes);
//! let frame = validate_frame(&hex).unwrap();
//! assert!(verify_frame(&frame).is_ok());
//! ```

use crate::constants::{
    SML_FRAME_CRC_HEX_LEN, SML_FRAME_END, SML_FRAME_PAYLOAD_HEX_LEN, SML_FRAME_START,
};
use crate::error::SmlError;
use crate::util::hex::{decode_hex, is_upper_hex, is_upper_hex_digit};
use crc::{Crc, CRC_16_IBM_SDLC};
use log::{debug, warn};
use nom::{
    bytes::complete::{tag, take_while_m_n},
    combinator::recognize,
    sequence::tuple,
    IResult,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CRC-16/X-25, the CCITT variant used by the SML transport layer.
const SML_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_SDLC);

const FRAME_START_BYTES: [u8; 8] = [0x1B, 0x1B, 0x1B, 0x1B, 0x01, 0x01, 0x01, 0x01];
const FRAME_END_BYTES: [u8; 7] = [0x00, 0x1B, 0x1B, 0x1B, 0x1B, 0x1A, 0x00];

/// Payload bytes between the start and end markers.
pub const SML_FRAME_PAYLOAD_BYTES: usize = SML_FRAME_PAYLOAD_HEX_LEN / 2;

/// A transport frame located inside the hex view of a read window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportFrame<'a> {
    /// Frame text from the start marker through the end marker.
    pub text: &'a str,
    /// Offset of the start marker in the window, in hex digits.
    pub offset: usize,
    /// CRC trailer text, if the window extends that far.
    pub checksum: Option<&'a str>,
}

impl<'a> TransportFrame<'a> {
    /// The hex digits between the start and end markers.
    pub fn payload(&self) -> &'a str {
        &self.text[SML_FRAME_START.len()..SML_FRAME_START.len() + SML_FRAME_PAYLOAD_HEX_LEN]
    }

    /// CRC transmitted with the frame (little-endian on the wire).
    pub fn transmitted_crc(&self) -> Option<u16> {
        let bytes = decode_hex(self.checksum?).ok()?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }
}

/// How the CRC trailer of a frame is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumPolicy {
    /// A mismatching or missing CRC rejects the frame.
    Strict,
    /// A mismatching or missing CRC is logged; the frame is decoded anyway.
    #[default]
    Warn,
    /// The CRC is not looked at.
    Ignore,
}

impl FromStr for ChecksumPolicy {
    type Err = SmlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(ChecksumPolicy::Strict),
            "warn" => Ok(ChecksumPolicy::Warn),
            "ignore" => Ok(ChecksumPolicy::Ignore),
            other => Err(SmlError::ConfigError(format!(
                "Unknown checksum policy '{other}' (expected strict, warn or ignore)"
            ))),
        }
    }
}

impl fmt::Display for ChecksumPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChecksumPolicy::Strict => "strict",
            ChecksumPolicy::Warn => "warn",
            ChecksumPolicy::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

/// Uses `nom` to recognize a complete frame at the start of `input`.
pub fn parse_transport_frame(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        tag(SML_FRAME_START),
        take_while_m_n(
            SML_FRAME_PAYLOAD_HEX_LEN,
            SML_FRAME_PAYLOAD_HEX_LEN,
            is_upper_hex_digit,
        ),
        tag(SML_FRAME_END),
    )))(input)
}

/// Finds the first byte-aligned transport frame in `hex`.
pub fn find_transport_frame(hex: &str) -> Option<TransportFrame<'_>> {
    let mut from = 0;
    while let Some(found) = hex[from..].find(SML_FRAME_START) {
        let offset = from + found;
        if offset % 2 == 0 {
            if let Ok((rest, text)) = parse_transport_frame(&hex[offset..]) {
                let checksum = rest
                    .get(..SML_FRAME_CRC_HEX_LEN)
                    .filter(|crc| is_upper_hex(crc));
                return Some(TransportFrame {
                    text,
                    offset,
                    checksum,
                });
            }
        }
        from = offset + 1;
    }
    None
}

/// Confirms that `hex` contains one complete transport frame.
///
/// The input must be uppercase hex of even length. On failure the error carries
/// the observed length and the whole buffer for diagnostics.
pub fn validate_frame(hex: &str) -> Result<TransportFrame<'_>, SmlError> {
    if !is_upper_hex(hex) {
        return Err(SmlError::InvalidHexString);
    }
    match find_transport_frame(hex) {
        Some(frame) => {
            debug!("SML frame found at hex offset {}", frame.offset);
            Ok(frame)
        }
        None => Err(SmlError::IncompleteFrame {
            length: hex.len(),
            content: hex.to_string(),
        }),
    }
}

/// Calculates the CRC-16/X-25 of `data`.
pub fn calculate_crc(data: &[u8]) -> u16 {
    SML_CRC.checksum(data)
}

/// Verifies the CRC trailer of a frame.
pub fn verify_frame(frame: &TransportFrame<'_>) -> Result<(), SmlError> {
    let expected = frame
        .transmitted_crc()
        .ok_or(SmlError::ChecksumUnavailable)?;
    let calculated = calculate_crc(&decode_hex(frame.text)?);
    if expected != calculated {
        return Err(SmlError::ChecksumMismatch {
            expected,
            calculated,
        });
    }
    Ok(())
}

/// Applies `policy` to the CRC check of a frame.
pub fn check_frame_crc(
    frame: &TransportFrame<'_>,
    policy: ChecksumPolicy,
) -> Result<(), SmlError> {
    match policy {
        ChecksumPolicy::Ignore => Ok(()),
        ChecksumPolicy::Strict => verify_frame(frame),
        ChecksumPolicy::Warn => {
            if let Err(e) = verify_frame(frame) {
                warn!("{e}; decoding frame anyway");
            }
            Ok(())
        }
    }
}

/// Packs a payload into a complete transport frame, CRC included.
///
/// Payloads shorter than the fixed frame body are padded with zero bytes.
pub fn pack_frame(payload: &[u8]) -> Result<Vec<u8>, SmlError> {
    if payload.len() > SML_FRAME_PAYLOAD_BYTES {
        return Err(SmlError::PayloadTooLong {
            length: payload.len(),
            max: SML_FRAME_PAYLOAD_BYTES,
        });
    }

    let mut data = Vec::with_capacity(
        FRAME_START_BYTES.len() + SML_FRAME_PAYLOAD_BYTES + FRAME_END_BYTES.len() + 2,
    );
    data.extend_from_slice(&FRAME_START_BYTES);
    data.extend_from_slice(payload);
    data.resize(FRAME_START_BYTES.len() + SML_FRAME_PAYLOAD_BYTES, 0x00);
    data.extend_from_slice(&FRAME_END_BYTES);

    let crc = calculate_crc(&data);
    data.extend_from_slice(&crc.to_le_bytes());
    Ok(data)
}
