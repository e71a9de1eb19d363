//! The sml module contains the transport side of the protocol: locating and
//! validating transport frames in a read window, and reading windows from the
//! serial port.

pub mod frame;
pub mod serial;

pub use frame::{
    check_frame_crc, pack_frame, validate_frame, verify_frame, ChecksumPolicy, TransportFrame,
};
pub use serial::{SerialConfig, SmlDeviceHandle};
