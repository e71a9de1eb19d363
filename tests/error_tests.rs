//! Unit tests for the `SmlError` enum and its `Display` implementation.

use sml_rs::error::SmlError;
use sml_rs::util::hex::HexError;

/// Tests that the `TransportError` variant is correctly formatted.
#[test]
fn test_transport_error() {
    let err = SmlError::TransportError("Test error".to_string());
    assert_eq!(err.to_string(), "Transport error: Test error");
}

/// Tests that `IncompleteFrame` reports length and content.
#[test]
fn test_incomplete_frame_error() {
    let err = SmlError::IncompleteFrame {
        length: 4,
        content: "1B1B".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Incomplete SML frame (length 4)\nMessage:\n1B1B"
    );
}

/// Tests that checksums are shown as four hex digits.
#[test]
fn test_checksum_mismatch_error() {
    let err = SmlError::ChecksumMismatch {
        expected: 0x8F28,
        calculated: 0x0A01,
    };
    assert_eq!(
        err.to_string(),
        "Invalid checksum: expected 0x8F28, calculated 0x0A01"
    );
}

/// Tests that the `UnknownIdentifier` variant is correctly formatted.
#[test]
fn test_unknown_identifier_error() {
    let err = SmlError::UnknownIdentifier("0100600100".to_string());
    assert_eq!(err.to_string(), "Unknown identifier: 0100600100");
}

/// Tests the split between record-level and frame-level errors.
#[test]
fn test_record_level_classification() {
    assert!(SmlError::UnknownIdentifier(String::new()).is_record_level());
    assert!(SmlError::RecordDecodeFailure {
        payload: "XX".to_string(),
        reason: "bad".to_string(),
    }
    .is_record_level());
    assert!(!SmlError::ChecksumUnavailable.is_record_level());
    assert!(!SmlError::RecordParseFailure(String::new()).is_record_level());
}

/// Tests the conversions into `SmlError`.
#[test]
fn test_conversions() {
    let err: SmlError = HexError::OddLength(3).into();
    assert_eq!(err, SmlError::InvalidHexString);

    let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "early eof");
    let err: SmlError = io.into();
    assert_eq!(err, SmlError::TransportError("early eof".to_string()));
}
