//! Temperature/humidity logger for a two-report hidraw sensor.
//!
//! # Crate Structure
//!
//! - [`device`] — hidraw device handle and descriptor probing
//! - [`report`] — report decoding, pairing and emission

/// Re-export device types.
pub mod device {
    pub use thermohid_device::*;
}

/// Re-export report types.
pub mod report {
    pub use thermohid_report::*;
}
