//! # Hex Encoding/Decoding Utilities
//!
//! The decoder works on the uppercase hex view of a read window, the same
//! representation meter dumps and logs use. This module converts between that
//! view and raw bytes.
//!
//! ## Usage
//!
//! ```rust
//! use sml_rs::util::hex::{encode_hex_upper, decode_hex, is_upper_hex};
//!
//! let data = [0x1B, 0x1B, 0x1B, 0x1B];
//! let hex_str = encode_hex_upper(&data);
//! assert_eq!(hex_str, "1B1B1B1B");
//! assert!(is_upper_hex(&hex_str));
//!
//! let decoded = decode_hex(&hex_str).unwrap();
//! assert_eq!(decoded, data);
//! ```

use thiserror::Error;

/// Errors that can occur during hex operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HexError {
    #[error("Odd number of hex characters: {0}")]
    OddLength(usize),

    #[error("Empty hex string")]
    EmptyString,

    #[error("Hex decoding error: {0}")]
    DecodeError(String),
}

/// Encode bytes to uppercase hex string
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, HexError> {
    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.is_empty() {
        return Err(HexError::EmptyString);
    }

    if cleaned.len() % 2 != 0 {
        return Err(HexError::OddLength(cleaned.len()));
    }

    hex::decode(&cleaned).map_err(|e| HexError::DecodeError(e.to_string()))
}

/// Returns true if `text` has even length and only contains `0-9` and `A-F`.
pub fn is_upper_hex(text: &str) -> bool {
    text.len() % 2 == 0 && text.chars().all(is_upper_hex_digit)
}

/// Single-character variant of [`is_upper_hex`].
pub fn is_upper_hex_digit(c: char) -> bool {
    c.is_ascii_digit() || ('A'..='F').contains(&c)
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "1B 1B 1B 1B" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_upper() {
        let data = vec![0xAB, 0xCD, 0xEF, 0x01];
        assert_eq!(encode_hex_upper(&data), "ABCDEF01");
    }

    #[test]
    fn test_decode_with_whitespace() {
        let hex = "1B 1B 1B 1B 01";
        let expected = vec![0x1B, 0x1B, 0x1B, 0x1B, 0x01];
        assert_eq!(decode_hex(hex).unwrap(), expected);
    }

    #[test]
    fn test_is_upper_hex() {
        assert!(is_upper_hex("1B1A00"));
        assert!(is_upper_hex(""));
        assert!(!is_upper_hex("1b1a00"));
        assert!(!is_upper_hex("1B1"));
        assert!(!is_upper_hex("1G"));
    }

    #[test]
    fn test_format_compact() {
        let data = vec![0x1B, 0x1B, 0x01, 0x1A];
        assert_eq!(format_hex_compact(&data), "1B 1B 01 1A");
    }

    #[test]
    fn test_errors() {
        assert_eq!(decode_hex(""), Err(HexError::EmptyString));
        assert_eq!(decode_hex("1"), Err(HexError::OddLength(1)));
        assert!(matches!(decode_hex("GG"), Err(HexError::DecodeError(_))));
    }
}
