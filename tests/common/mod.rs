// Shared helpers for building synthetic read windows
#![allow(dead_code)]

use sml_rs::constants::SML_READ_WINDOW_BYTES;
use sml_rs::payload::record::{pack_record, TypeMarker};
use sml_rs::sml::frame::pack_frame;
use sml_rs::util::hex::decode_hex;

/// Bytes before the frame, standing in for the tail of the previous transmission.
pub const LEAD_IN: usize = 200;

/// The records of a captured eHZ transmission, with the export counters added.
pub fn sample_records() -> Vec<String> {
    vec![
        pack_record("0100010800", TypeMarker::EnergyWithStatus, 0x0517_E31B),
        pack_record("0100010801", TypeMarker::Energy, 0x0517_E31B),
        pack_record("0100010802", TypeMarker::Energy, 0),
        pack_record("0100020800", TypeMarker::Energy, 1_234_567),
        pack_record("0100020801", TypeMarker::Energy, 1_234_567),
        pack_record("0100020802", TypeMarker::Energy, 0),
        pack_record("0100100700", TypeMarker::Power, 0x21D),
        pack_record("0100240700", TypeMarker::Power, 0xBC),
        pack_record("0100380700", TypeMarker::Power, 0xA8),
        pack_record("01004C0700", TypeMarker::Power, 0xB9),
    ]
}

/// Packs record hex text into a complete frame (bytes, CRC included).
pub fn frame_bytes(records: &[String]) -> Vec<u8> {
    let payload = decode_hex(&records.concat()).unwrap_or_default();
    pack_frame(&payload).unwrap()
}

/// Places a frame inside a full-size read window.
pub fn window_with(frame: &[u8]) -> Vec<u8> {
    let mut window = vec![0u8; LEAD_IN];
    window.extend_from_slice(frame);
    window.resize(SML_READ_WINDOW_BYTES, 0);
    window
}

pub fn window_from_records(records: &[String]) -> Vec<u8> {
    window_with(&frame_bytes(records))
}
