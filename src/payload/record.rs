//! # SML List Entry Records
//!
//! Inside a GetList response every measurement is an `SML_ListEntry`, a list of
//! seven elements. For the entries this crate reads, the hex text has the shape
//!
//! ```text
//! 7707 <OBIS, 10 digits> FF <type/unit marker> <value> 01
//! ```
//!
//! where the marker is one of
//!
//! | Marker | Meaning | Declared width |
//! |---|---|---|
//! | `65000101` ? `201621E52FF59` | status word, Wh, scaler -1, Integer64 | 16 digits |
//! | `0101621E52FF59` | Wh, scaler -1, Integer64 | 16 digits |
//! | `0101621B520055` | W, scaler 0, Integer32 | 8 digits |
//!
//! `?` is one meter-specific status digit. The value is 8 to 16 hex digits.
//! Its width is first taken from the marker's last byte, the SML type-length
//! field (`59` or `55`), so a value containing `01` is read whole. Meters that
//! send a different integer size fall back to the shortest run of 8 to 16
//! digits followed by `01`.

use crate::constants::{
    SML_MARKER_ENERGY, SML_MARKER_POWER, SML_MARKER_STATUS_HEAD, SML_MARKER_STATUS_TAIL,
    SML_MAX_VALUE_DIGITS, SML_MIN_VALUE_DIGITS, SML_RECORD_IDENTIFIER_LEN, SML_RECORD_PREFIX,
    SML_RECORD_SEPARATOR, SML_RECORD_TERMINATOR,
};
use crate::error::SmlError;
use crate::sml::frame::find_transport_frame;
use crate::util::hex::is_upper_hex_digit;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::satisfy,
    combinator::{all_consuming, value},
    sequence::{terminated, tuple},
    IResult,
};
use std::iter::FusedIterator;

/// Type/unit marker of a list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeMarker {
    EnergyWithStatus,
    Energy,
    Power,
}

impl TypeMarker {
    /// Hex digits of the value following this marker.
    pub fn value_digits(self) -> usize {
        match self {
            TypeMarker::EnergyWithStatus | TypeMarker::Energy => 16,
            TypeMarker::Power => 8,
        }
    }

    /// Hex text of the marker, using `8` as the status digit.
    pub fn to_hex(self) -> String {
        match self {
            TypeMarker::EnergyWithStatus => {
                format!("{SML_MARKER_STATUS_HEAD}8{SML_MARKER_STATUS_TAIL}")
            }
            TypeMarker::Energy => SML_MARKER_ENERGY.to_string(),
            TypeMarker::Power => SML_MARKER_POWER.to_string(),
        }
    }
}

/// One list entry, borrowed from the frame text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataRecord<'a> {
    /// OBIS identifier, 10 hex digits.
    pub identifier: &'a str,
    pub marker: TypeMarker,
    /// Value payload, 8 to 16 hex digits.
    pub value: &'a str,
    /// The whole record text.
    pub text: &'a str,
}

fn type_marker(input: &str) -> IResult<&str, TypeMarker> {
    alt((
        value(
            TypeMarker::EnergyWithStatus,
            tuple((
                tag(SML_MARKER_STATUS_HEAD),
                satisfy(is_upper_hex_digit),
                tag(SML_MARKER_STATUS_TAIL),
            )),
        ),
        value(TypeMarker::Energy, tag(SML_MARKER_ENERGY)),
        value(TypeMarker::Power, tag(SML_MARKER_POWER)),
    ))(input)
}

/// Value of exactly `digits` hex digits, then the terminator.
fn value_of_width(digits: usize, input: &str) -> IResult<&str, &str> {
    terminated(
        take_while_m_n(digits, digits, is_upper_hex_digit),
        tag(SML_RECORD_TERMINATOR),
    )(input)
}

/// Record value: the marker's width if it fits, else the shortest run that
/// ends in the terminator.
fn record_value(marker: TypeMarker, input: &str) -> IResult<&str, &str> {
    let declared = value_of_width(marker.value_digits(), input);
    if declared.is_ok() {
        return declared;
    }
    for digits in SML_MIN_VALUE_DIGITS..=SML_MAX_VALUE_DIGITS {
        if let Ok(found) = value_of_width(digits, input) {
            return Ok(found);
        }
    }
    declared
}

/// Uses `nom` to parse one record at the start of `input`.
pub fn data_record(input: &str) -> IResult<&str, DataRecord<'_>> {
    let start = input;
    let (input, _) = tag(SML_RECORD_PREFIX)(input)?;
    let (input, identifier) = take_while_m_n(
        SML_RECORD_IDENTIFIER_LEN,
        SML_RECORD_IDENTIFIER_LEN,
        is_upper_hex_digit,
    )(input)?;
    let (input, _) = tag(SML_RECORD_SEPARATOR)(input)?;
    let (input, marker) = type_marker(input)?;
    let (input, value) = record_value(marker, input)?;

    let text = &start[..start.len() - input.len()];
    Ok((
        input,
        DataRecord {
            identifier,
            marker,
            value,
            text,
        },
    ))
}

/// Parses `text` as exactly one record.
pub fn parse_record(text: &str) -> Result<DataRecord<'_>, SmlError> {
    all_consuming(data_record)(text)
        .map(|(_, record)| record)
        .map_err(|_| SmlError::RecordParseFailure(format!("not a data record: {text}")))
}

/// Iterator over the records of a frame, in order of appearance.
#[derive(Debug, Clone)]
pub struct RecordIter<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for RecordIter<'a> {
    type Item = DataRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(found) = self.text[self.pos..].find(SML_RECORD_PREFIX) {
            let at = self.pos + found;
            if at % 2 == 0 {
                if let Ok((rest, record)) = data_record(&self.text[at..]) {
                    self.pos = self.text.len() - rest.len();
                    return Some(record);
                }
            }
            self.pos = at + 1;
        }
        self.pos = self.text.len();
        None
    }
}

impl FusedIterator for RecordIter<'_> {}

/// Scans frame text for records, left to right and byte-aligned.
///
/// Matches never overlap; text between records is skipped.
pub fn records(frame_text: &str) -> RecordIter<'_> {
    RecordIter {
        text: frame_text,
        pos: 0,
    }
}

/// Locates the transport frame in a read window and scans only its records.
pub fn records_in_window(window_hex: &str) -> Result<RecordIter<'_>, SmlError> {
    let frame = find_transport_frame(window_hex).ok_or_else(|| {
        SmlError::RecordParseFailure("no transport frame in read window".to_string())
    })?;
    Ok(records(frame.text))
}

/// Renders one record as hex text.
///
/// `value` is written with the width the marker calls for; power values keep
/// only their low 32 bits.
pub fn pack_record(identifier: &str, marker: TypeMarker, value: u64) -> String {
    let digits = marker.value_digits();
    let value = if digits == 8 { value & 0xFFFF_FFFF } else { value };
    let mut text = format!("{SML_RECORD_PREFIX}{identifier}{SML_RECORD_SEPARATOR}");
    text.push_str(&marker.to_hex());
    text.push_str(&format!("{value:0digits$X}{SML_RECORD_TERMINATOR}"));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENERGY_TOTAL: &str = "77070100010800FF650001018201621E52FF59000000000517E31B01";
    const POWER_TOTAL: &str = "77070100100700FF0101621B5200550000021D01";

    #[test]
    fn test_parse_status_energy_record() {
        let record = parse_record(ENERGY_TOTAL).unwrap();
        assert_eq!(record.identifier, "0100010800");
        assert_eq!(record.marker, TypeMarker::EnergyWithStatus);
        assert_eq!(record.value, "000000000517E31B");
        assert_eq!(record.text, ENERGY_TOTAL);
    }

    #[test]
    fn test_parse_power_record() {
        let record = parse_record(POWER_TOTAL).unwrap();
        assert_eq!(record.identifier, "0100100700");
        assert_eq!(record.marker, TypeMarker::Power);
        assert_eq!(record.value, "0000021D");
    }

    #[test]
    fn test_parse_rejects_trailing_data() {
        let text = format!("{POWER_TOTAL}00");
        assert!(matches!(parse_record(&text), Err(SmlError::RecordParseFailure(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_marker() {
        let text = "77070100100700FF0101621B5201550000021D01";
        assert!(parse_record(text).is_err());
    }

    #[test]
    fn test_value_containing_terminator() {
        // A 16-digit value with "01" inside must not end the record early
        let text = "77070100010801FF0101621E52FF59000000000100000101";
        let record = parse_record(text).unwrap();
        assert_eq!(record.value, "0000000001000001");
    }

    #[test]
    fn test_energy_marker_with_short_value() {
        let text = "77070100010800FF0101621E52FF590517E31B01";
        let record = parse_record(text).unwrap();
        assert_eq!(record.marker, TypeMarker::Energy);
        assert_eq!(record.value, "0517E31B");
    }

    #[test]
    fn test_power_marker_with_wide_value() {
        let text = "77070100100700FF0101621B520055000000000000021D01";
        let record = parse_record(text).unwrap();
        assert_eq!(record.marker, TypeMarker::Power);
        assert_eq!(record.value, "000000000000021D");
    }

    #[test]
    fn test_fallback_takes_shortest_value() {
        // The first terminator follows the tenth digit
        let text = "77070100100700FF0101621B52005500000000210101";
        let record = parse_record(&text[..text.len() - 2]).unwrap();
        assert_eq!(record.value, "0000000021");
        assert_eq!(records(text).next().unwrap().value, "0000000021");
    }

    #[test]
    fn test_value_shorter_than_eight_digits_rejected() {
        assert!(parse_record("77070100100700FF0101621B520055021D01").is_err());
    }

    #[test]
    fn test_records_in_order_with_gaps() {
        let text = format!("76050100{ENERGY_TOTAL}0000{POWER_TOTAL}0101");
        let found: Vec<_> = records(&text).map(|r| r.identifier).collect();
        assert_eq!(found, vec!["0100010800", "0100100700"]);
    }

    #[test]
    fn test_misaligned_record_skipped() {
        let text = format!("0{POWER_TOTAL}0");
        assert_eq!(records(&text).count(), 0);
    }

    #[test]
    fn test_iterator_is_fused() {
        let mut iter = records(POWER_TOTAL);
        assert!(iter.next().is_some());
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_pack_record_matches_capture() {
        assert_eq!(pack_record("0100100700", TypeMarker::Power, 0x21D), POWER_TOTAL);
        assert_eq!(
            pack_record("0100010800", TypeMarker::EnergyWithStatus, 0x0517_E31B),
            ENERGY_TOTAL
        );
    }

    #[test]
    fn test_records_in_window_without_frame() {
        assert!(matches!(
            records_in_window(POWER_TOTAL),
            Err(SmlError::RecordParseFailure(_))
        ));
    }
}
