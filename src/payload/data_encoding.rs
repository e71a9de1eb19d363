//! Value decoding for SML list entries.
//!
//! Values arrive as big-endian hex text. The meters encode energy counters as
//! 64-bit integers with unit Wh and scaler -1, power as 32-bit integers in W.
//! Both are reduced to `i32`: energy in whole kWh, power in W.

use crate::constants::SML_ENERGY_DIVISOR;
use crate::error::SmlError;
use crate::payload::obis_maps::FieldWidth;

/// Decodes a hex value payload and applies the scaling for `width`.
///
/// The parsed value is truncated to its low 32 bits and reinterpreted as a
/// signed integer before scaling; wraparound is not guarded against. 16-digit
/// payloads are divided by 10 000 (truncating toward zero).
pub fn decode_value(payload: &str, width: FieldWidth) -> Result<i32, SmlError> {
    if payload.is_empty() || payload.len() > 16 {
        return Err(decode_failure(payload, "expected 1 to 16 hex digits"));
    }
    if !payload.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(decode_failure(payload, "not a hexadecimal number"));
    }

    let raw =
        u64::from_str_radix(payload, 16).map_err(|e| decode_failure(payload, &e.to_string()))?;
    let value = raw as u32 as i32;

    Ok(match width {
        FieldWidth::Digits16 => value / SML_ENERGY_DIVISOR,
        FieldWidth::Digits8 => value,
    })
}

fn decode_failure(payload: &str, reason: &str) -> SmlError {
    SmlError::RecordDecodeFailure {
        payload: payload.to_string(),
        reason: reason.to_string(),
    }
}
