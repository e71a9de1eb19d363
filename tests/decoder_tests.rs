//! Tests for the record catalogue and value decoding.

use proptest::prelude::*;
use sml_rs::payload::obis_maps::{lookup, FieldWidth, ReadingField, RECORD_CATALOGUE};
use sml_rs::payload::data_encoding::decode_value;
use sml_rs::SmlError;

#[test]
fn test_catalogue_has_ten_entries() {
    assert_eq!(RECORD_CATALOGUE.len(), 10);
    for field in ReadingField::ALL {
        let count = RECORD_CATALOGUE.iter().filter(|d| d.field == field).count();
        assert_eq!(count, 1, "{field} must appear exactly once");
    }
}

#[test]
fn test_catalogue_widths() {
    let energy = lookup("0100020802").unwrap();
    assert_eq!(energy.field, ReadingField::EnergyExportTariff2);
    assert_eq!(energy.width, FieldWidth::Digits16);
    assert_eq!(energy.field.unit(), "kWh");

    let power = lookup("0100240700").unwrap();
    assert_eq!(power.field, ReadingField::PowerPhase1);
    assert_eq!(power.width, FieldWidth::Digits8);
    assert_eq!(power.field.unit(), "W");
}

#[test]
fn test_lookup_is_exact() {
    assert!(lookup("010001080").is_none());
    assert!(lookup("01000108000").is_none());
    assert!(lookup("0100010803").is_none());
}

#[test]
fn test_decode_failure_carries_payload() {
    match decode_value("00G0021D", FieldWidth::Digits8) {
        Err(SmlError::RecordDecodeFailure { payload, .. }) => assert_eq!(payload, "00G0021D"),
        other => panic!("expected RecordDecodeFailure, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn prop_energy_scaled_by_ten_thousand(v in 0u64..=i32::MAX as u64) {
        let payload = format!("{v:016X}");
        let expected = (v / 10_000) as i32;
        prop_assert_eq!(decode_value(&payload, FieldWidth::Digits16).unwrap(), expected);
    }

    #[test]
    fn prop_power_reinterpreted_signed(v in any::<u32>()) {
        let payload = format!("{v:08X}");
        prop_assert_eq!(decode_value(&payload, FieldWidth::Digits8).unwrap(), v as i32);
    }

    #[test]
    fn prop_wide_values_keep_low_32_bits(v in any::<u64>()) {
        let payload = format!("{v:016X}");
        let low = v as u32 as i32;
        prop_assert_eq!(decode_value(&payload, FieldWidth::Digits8).unwrap(), low);
        prop_assert_eq!(decode_value(&payload, FieldWidth::Digits16).unwrap(), low / 10_000);
    }
}
