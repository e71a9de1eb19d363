//! # SML Payload Processing
//!
//! Everything between a validated transport frame and a typed value:
//!
//! - `record`: tokenizes the frame into list entry records
//! - `obis_maps`: the catalogue of recognized OBIS identifiers
//! - `data_encoding`: decodes and scales value payloads

pub mod data_encoding;
pub mod obis_maps;
pub mod record;

pub use data_encoding::decode_value;
pub use obis_maps::{lookup, FieldWidth, ReadingField, RecordDescriptor, RECORD_CATALOGUE};
pub use record::{parse_record, records, records_in_window, DataRecord, RecordIter, TypeMarker};
