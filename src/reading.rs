//! # Reading Aggregation
//!
//! Turns one read window into a [`Reading`]: validate the transport frame,
//! extract its records, look each one up in the catalogue, decode the value and
//! store it in the field the catalogue names.
//!
//! Frame-level failures abort the decode and no reading is returned. Failures
//! of a single record (unknown identifier, undecodable value) are logged, noted
//! in the [`DecodeReport`] and skipped.
//!
//! ```rust
//! use sml_rs::reading::ReadingDecoder;
//! use sml_rs::payload::{record::pack_record, ReadingField, TypeMarker};
//! use sml_rs::sml::frame::pack_frame;
//! use sml_rs::util::hex::decode_hex;
//!
//! let record = pack_record("0100100700", TypeMarker::Power, 541);
//! let window = pack_frame(&decode_hex(&record).unwrap()).unwrap();
//!
//! let reading = ReadingDecoder::default().decode(&window).unwrap();
//! assert_eq!(reading.get(ReadingField::PowerTotal), Some(541));
//! assert_eq!(reading.get(ReadingField::PowerPhase1), None);
//! ```

use crate::error::SmlError;
use crate::payload::data_encoding::decode_value;
use crate::payload::obis_maps::{lookup, ReadingField};
use crate::payload::record::{records, DataRecord};
use crate::sml::frame::{check_frame_crc, validate_frame, ChecksumPolicy};
use crate::util::hex::encode_hex_upper;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// One decoded snapshot of the meter.
///
/// Energy fields are in kWh, power fields in W. A field is `None` when its
/// record was absent from the frame or could not be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reading {
    pub energy_import_total: Option<i32>,
    pub energy_import_tariff1: Option<i32>,
    pub energy_import_tariff2: Option<i32>,
    pub energy_export_total: Option<i32>,
    pub energy_export_tariff1: Option<i32>,
    pub energy_export_tariff2: Option<i32>,
    pub power_total: Option<i32>,
    pub power_phase1: Option<i32>,
    pub power_phase2: Option<i32>,
    pub power_phase3: Option<i32>,
}

impl Reading {
    pub fn get(&self, field: ReadingField) -> Option<i32> {
        match field {
            ReadingField::EnergyImportTotal => self.energy_import_total,
            ReadingField::EnergyImportTariff1 => self.energy_import_tariff1,
            ReadingField::EnergyImportTariff2 => self.energy_import_tariff2,
            ReadingField::EnergyExportTotal => self.energy_export_total,
            ReadingField::EnergyExportTariff1 => self.energy_export_tariff1,
            ReadingField::EnergyExportTariff2 => self.energy_export_tariff2,
            ReadingField::PowerTotal => self.power_total,
            ReadingField::PowerPhase1 => self.power_phase1,
            ReadingField::PowerPhase2 => self.power_phase2,
            ReadingField::PowerPhase3 => self.power_phase3,
        }
    }

    /// Stores a value, replacing any earlier one.
    pub fn set(&mut self, field: ReadingField, value: i32) {
        let slot = match field {
            ReadingField::EnergyImportTotal => &mut self.energy_import_total,
            ReadingField::EnergyImportTariff1 => &mut self.energy_import_tariff1,
            ReadingField::EnergyImportTariff2 => &mut self.energy_import_tariff2,
            ReadingField::EnergyExportTotal => &mut self.energy_export_total,
            ReadingField::EnergyExportTariff1 => &mut self.energy_export_tariff1,
            ReadingField::EnergyExportTariff2 => &mut self.energy_export_tariff2,
            ReadingField::PowerTotal => &mut self.power_total,
            ReadingField::PowerPhase1 => &mut self.power_phase1,
            ReadingField::PowerPhase2 => &mut self.power_phase2,
            ReadingField::PowerPhase3 => &mut self.power_phase3,
        };
        *slot = Some(value);
    }

    /// The value with absent fields read as zero.
    pub fn value_or_zero(&self, field: ReadingField) -> i32 {
        self.get(field).unwrap_or(0)
    }

    /// All fields in catalogue order.
    pub fn fields(&self) -> impl Iterator<Item = (ReadingField, Option<i32>)> + '_ {
        ReadingField::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// True if no field was decoded.
    pub fn is_empty(&self) -> bool {
        self.fields().all(|(_, value)| value.is_none())
    }
}

/// Progress of a [`ReadingDecoder`] through one decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    AwaitingFrame,
    FrameValidated,
    RecordsExtracted,
    ReadingComplete,
    Failed,
}

/// A record that did not contribute to the reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub identifier: String,
    pub error: SmlError,
}

/// Result of a decode with the per-record failures kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeReport {
    pub reading: Reading,
    /// Records found in the frame, skipped ones included.
    pub records_seen: usize,
    pub skipped: Vec<SkippedRecord>,
}

/// Decodes read windows into readings.
///
/// A decoder holds no data between calls apart from the state of the last
/// decode; every call starts from [`DecodeState::AwaitingFrame`].
#[derive(Debug, Clone)]
pub struct ReadingDecoder {
    checksum_policy: ChecksumPolicy,
    state: DecodeState,
}

impl Default for ReadingDecoder {
    fn default() -> Self {
        Self::new(ChecksumPolicy::default())
    }
}

impl ReadingDecoder {
    pub fn new(checksum_policy: ChecksumPolicy) -> Self {
        ReadingDecoder {
            checksum_policy,
            state: DecodeState::AwaitingFrame,
        }
    }

    /// State reached by the last decode.
    pub fn state(&self) -> DecodeState {
        self.state
    }

    /// Decodes a raw read window.
    pub fn decode(&mut self, raw: &[u8]) -> Result<Reading, SmlError> {
        self.decode_report(raw).map(|report| report.reading)
    }

    /// Decodes a raw read window, keeping the skipped records.
    pub fn decode_report(&mut self, raw: &[u8]) -> Result<DecodeReport, SmlError> {
        self.decode_hex_report(&encode_hex_upper(raw))
    }

    /// Decodes the uppercase hex view of a read window.
    pub fn decode_hex(&mut self, hex: &str) -> Result<Reading, SmlError> {
        self.decode_hex_report(hex).map(|report| report.reading)
    }

    pub fn decode_hex_report(&mut self, hex: &str) -> Result<DecodeReport, SmlError> {
        self.state = DecodeState::AwaitingFrame;
        let result = self.run(hex);
        if let Err(e) = &result {
            debug!("Decode failed: {e}");
            self.state = DecodeState::Failed;
        }
        result
    }

    fn run(&mut self, hex: &str) -> Result<DecodeReport, SmlError> {
        let frame = validate_frame(hex)?;
        check_frame_crc(&frame, self.checksum_policy)?;
        self.state = DecodeState::FrameValidated;

        let records = records(frame.text);
        self.state = DecodeState::RecordsExtracted;

        let mut report = DecodeReport::default();
        for record in records {
            report.records_seen += 1;
            if let Err(error) = apply_record(&mut report.reading, &record) {
                warn!("Skipping record {}: {error}", record.identifier);
                report.skipped.push(SkippedRecord {
                    identifier: record.identifier.to_string(),
                    error,
                });
            }
        }

        self.state = DecodeState::ReadingComplete;
        Ok(report)
    }
}

/// Decodes one record into `reading`.
///
/// Fails with `UnknownIdentifier` or `RecordDecodeFailure`; `reading` is left
/// untouched in both cases.
pub fn apply_record(reading: &mut Reading, record: &DataRecord<'_>) -> Result<(), SmlError> {
    let descriptor = lookup(record.identifier)
        .ok_or_else(|| SmlError::UnknownIdentifier(record.identifier.to_string()))?;
    if record.value.len() != descriptor.width.digits() {
        debug!(
            "{} sent with {} digits, catalogue declares {}",
            descriptor.name(),
            record.value.len(),
            descriptor.width.digits()
        );
    }
    let value = decode_value(record.value, descriptor.width)?;
    debug!("{} = {} {}", descriptor.name(), value, descriptor.field.unit());
    reading.set(descriptor.field, value);
    Ok(())
}

/// Decodes a raw read window with a fresh decoder.
pub fn decode_reading(raw: &[u8], checksum_policy: ChecksumPolicy) -> Result<Reading, SmlError> {
    ReadingDecoder::new(checksum_policy).decode(raw)
}
