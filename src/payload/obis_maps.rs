//! OBIS Identifier Catalogue
//!
//! The fixed set of list entries the decoder understands. Identifiers are the
//! first five bytes of the OBIS code (A-B:C.D.E, the trailing F byte is always
//! `FF`) as uppercase hex. Energy counters are 16 hex digits wide, power values
//! 8.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Names the quantity a catalogue entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingField {
    EnergyImportTotal,
    EnergyImportTariff1,
    EnergyImportTariff2,
    EnergyExportTotal,
    EnergyExportTariff1,
    EnergyExportTariff2,
    PowerTotal,
    PowerPhase1,
    PowerPhase2,
    PowerPhase3,
}

impl ReadingField {
    pub const ALL: [ReadingField; 10] = [
        ReadingField::EnergyImportTotal,
        ReadingField::EnergyImportTariff1,
        ReadingField::EnergyImportTariff2,
        ReadingField::EnergyExportTotal,
        ReadingField::EnergyExportTariff1,
        ReadingField::EnergyExportTariff2,
        ReadingField::PowerTotal,
        ReadingField::PowerPhase1,
        ReadingField::PowerPhase2,
        ReadingField::PowerPhase3,
    ];

    /// Symbolic field name.
    pub fn name(self) -> &'static str {
        match self {
            ReadingField::EnergyImportTotal => "EnergyImportTotal",
            ReadingField::EnergyImportTariff1 => "EnergyImportTariff1",
            ReadingField::EnergyImportTariff2 => "EnergyImportTariff2",
            ReadingField::EnergyExportTotal => "EnergyExportTotal",
            ReadingField::EnergyExportTariff1 => "EnergyExportTariff1",
            ReadingField::EnergyExportTariff2 => "EnergyExportTariff2",
            ReadingField::PowerTotal => "PowerTotal",
            ReadingField::PowerPhase1 => "PowerPhase1",
            ReadingField::PowerPhase2 => "PowerPhase2",
            ReadingField::PowerPhase3 => "PowerPhase3",
        }
    }

    /// Unit of the decoded value.
    pub fn unit(self) -> &'static str {
        match self {
            ReadingField::PowerTotal
            | ReadingField::PowerPhase1
            | ReadingField::PowerPhase2
            | ReadingField::PowerPhase3 => "W",
            _ => "kWh",
        }
    }
}

impl fmt::Display for ReadingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declared width of a value payload, in hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    /// 32-bit power value in W, used unscaled.
    Digits8,
    /// 64-bit energy counter in 0.1 Wh, scaled to kWh.
    Digits16,
}

impl FieldWidth {
    pub fn digits(self) -> usize {
        match self {
            FieldWidth::Digits8 => 8,
            FieldWidth::Digits16 => 16,
        }
    }
}

/// One entry of the record catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDescriptor {
    pub identifier: &'static str,
    pub field: ReadingField,
    pub width: FieldWidth,
}

impl RecordDescriptor {
    pub fn name(&self) -> &'static str {
        self.field.name()
    }
}

/// Recognized list entries, keyed by identifier.
#[rustfmt::skip]
pub const RECORD_CATALOGUE: &[RecordDescriptor] = &[
    RecordDescriptor { identifier: "0100010800", field: ReadingField::EnergyImportTotal, width: FieldWidth::Digits16 },
    RecordDescriptor { identifier: "0100010801", field: ReadingField::EnergyImportTariff1, width: FieldWidth::Digits16 },
    RecordDescriptor { identifier: "0100010802", field: ReadingField::EnergyImportTariff2, width: FieldWidth::Digits16 },
    RecordDescriptor { identifier: "0100020800", field: ReadingField::EnergyExportTotal, width: FieldWidth::Digits16 },
    RecordDescriptor { identifier: "0100020801", field: ReadingField::EnergyExportTariff1, width: FieldWidth::Digits16 },
    RecordDescriptor { identifier: "0100020802", field: ReadingField::EnergyExportTariff2, width: FieldWidth::Digits16 },
    RecordDescriptor { identifier: "0100100700", field: ReadingField::PowerTotal, width: FieldWidth::Digits8 },
    RecordDescriptor { identifier: "0100240700", field: ReadingField::PowerPhase1, width: FieldWidth::Digits8 },
    RecordDescriptor { identifier: "0100380700", field: ReadingField::PowerPhase2, width: FieldWidth::Digits8 },
    RecordDescriptor { identifier: "01004C0700", field: ReadingField::PowerPhase3, width: FieldWidth::Digits8 },
];

static CATALOGUE_BY_ID: Lazy<HashMap<&'static str, &'static RecordDescriptor>> = Lazy::new(|| {
    RECORD_CATALOGUE
        .iter()
        .map(|descriptor| (descriptor.identifier, descriptor))
        .collect()
});

/// Looks up a record identifier (10 uppercase hex digits).
pub fn lookup(identifier: &str) -> Option<&'static RecordDescriptor> {
    CATALOGUE_BY_ID.get(identifier).copied()
}
