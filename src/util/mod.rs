//! # Utility Modules
//!
//! Common helpers used throughout the sml-rs crate.

pub mod hex;

pub use hex::{decode_hex, encode_hex_upper, format_hex_compact, is_upper_hex};
