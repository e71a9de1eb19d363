//! SML Protocol Constants
//!
//! This module defines the wire constants of the SML transport layer (version 1)
//! and of the list-entry records the decoder recognizes. All markers are given as
//! uppercase hex text, since decoding operates on the hex view of the read window.

/// Number of bytes read from the meter per decode attempt.
pub const SML_READ_WINDOW_BYTES: usize = 950;

/// Escape sequence followed by the version 1 start sequence.
pub const SML_FRAME_START: &str = "1B1B1B1B01010101";

/// Last message byte, escape sequence, end marker and padding count.
pub const SML_FRAME_END: &str = "001B1B1B1B1A00";

/// Hex digits between the start and end markers.
pub const SML_FRAME_PAYLOAD_HEX_LEN: usize = 886;

/// Hex digits of a complete frame, markers included, CRC excluded.
pub const SML_FRAME_HEX_LEN: usize =
    SML_FRAME_START.len() + SML_FRAME_PAYLOAD_HEX_LEN + SML_FRAME_END.len();

/// Hex digits of the CRC-16 trailer following the end marker.
pub const SML_FRAME_CRC_HEX_LEN: usize = 4;

// ----------------------------------------------------------------------------
// List entry records
// ----------------------------------------------------------------------------

/// List of seven elements, followed by a six-byte octet string (the OBIS code).
pub const SML_RECORD_PREFIX: &str = "7707";

/// Hex digits of the identifier following the prefix.
pub const SML_RECORD_IDENTIFIER_LEN: usize = 10;

/// Last OBIS byte, always 0xFF for the recognized entries.
pub const SML_RECORD_SEPARATOR: &str = "FF";

/// Status word marker; one hex digit of the status is meter-specific.
pub const SML_MARKER_STATUS_HEAD: &str = "65000101";
pub const SML_MARKER_STATUS_TAIL: &str = "201621E52FF59";

/// Energy entry without status: unit Wh (0x1E), scaler -1, Integer64.
pub const SML_MARKER_ENERGY: &str = "0101621E52FF59";

/// Power entry: unit W (0x1B), scaler 0, Integer32.
pub const SML_MARKER_POWER: &str = "0101621B520055";

/// Terminates a list entry (empty value signature).
pub const SML_RECORD_TERMINATOR: &str = "01";

/// Bounds of a value payload, in hex digits.
pub const SML_MIN_VALUE_DIGITS: usize = 8;
pub const SML_MAX_VALUE_DIGITS: usize = 16;

/// Divisor turning 0.1 Wh counter values into whole kWh.
pub const SML_ENERGY_DIVISOR: i32 = 10_000;
