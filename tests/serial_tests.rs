//! Tests for reading windows through `SmlDeviceHandle` and `MeterReader`,
//! using `tokio_test::io` as the serial port.

mod common;

use common::{sample_records, window_from_records};
use sml_rs::{
    ChecksumPolicy, DecodeState, MeterReader, SerialConfig, SmlDeviceHandle, SmlError,
};
use std::time::Duration;
use tokio_test::io::Builder;

fn quick_config() -> SerialConfig {
    SerialConfig {
        timeout: Duration::from_millis(50),
        ..SerialConfig::default()
    }
}

#[tokio::test]
async fn test_read_full_window() {
    let window = window_from_records(&sample_records());
    let mock = Builder::new().read(&window).build();
    let mut handle = SmlDeviceHandle::from_port(mock, quick_config());

    let data = handle.read_window().await.unwrap();
    assert_eq!(data.len(), 950);
    assert_eq!(data, window);
}

#[tokio::test]
async fn test_read_window_in_chunks() {
    let window = window_from_records(&sample_records());
    let mock = Builder::new()
        .read(&window[..300])
        .read(&window[300..700])
        .read(&window[700..])
        .build();
    let mut handle = SmlDeviceHandle::from_port(mock, quick_config());
    assert_eq!(handle.read_window().await.unwrap(), window);
}

#[tokio::test]
async fn test_short_read_is_transport_error() {
    let window = window_from_records(&sample_records());
    let mock = Builder::new().read(&window[..400]).build();
    let mut handle = SmlDeviceHandle::from_port(mock, quick_config());

    assert!(matches!(
        handle.read_window().await,
        Err(SmlError::TransportError(_))
    ));
}

#[tokio::test]
async fn test_silent_port_times_out() {
    let mock = Builder::new().wait(Duration::from_secs(5)).build();
    let mut handle = SmlDeviceHandle::from_port(mock, quick_config());

    match handle.read_window().await {
        Err(SmlError::TransportError(msg)) => assert!(msg.contains("timed out")),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_meter_reader_sample() {
    let window = window_from_records(&sample_records());
    let mock = Builder::new().read(&window).build();
    let handle = SmlDeviceHandle::from_port(mock, quick_config());
    let mut reader = MeterReader::new(handle, ChecksumPolicy::Strict);

    let sample = reader.read_sample().await.unwrap();
    assert_eq!(sample.reading.energy_import_total, Some(8545));
    assert_eq!(sample.reading.power_phase3, Some(185));
    assert_eq!(reader.decoder_state(), DecodeState::ReadingComplete);
}

#[tokio::test]
async fn test_meter_reader_garbage_window() {
    let mock = Builder::new().read(&[0x55; 950]).build();
    let handle = SmlDeviceHandle::from_port(mock, quick_config());
    let mut reader = MeterReader::new(handle, ChecksumPolicy::Warn);

    assert!(matches!(
        reader.read_sample().await,
        Err(SmlError::IncompleteFrame { length: 1900, .. })
    ));
    assert_eq!(reader.decoder_state(), DecodeState::Failed);
}

#[tokio::test]
async fn test_meter_reader_report() {
    let mut records = sample_records();
    records.push("77070100600100FF0101621B5200550000000101".to_string());
    let window = window_from_records(&records);
    let mock = Builder::new().read(&window).build();
    let handle = SmlDeviceHandle::from_port(mock, quick_config());
    let mut reader = MeterReader::new(handle, ChecksumPolicy::Strict);

    let report = reader.read_report().await.unwrap();
    assert_eq!(report.records_seen, 11);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].identifier, "0100600100");
}
