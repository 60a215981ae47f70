//! Raw HID device access.
//!
//! Opens a hidraw character device for blocking reads and exposes the
//! descriptor queries the kernel provides for it:
//! - report descriptor size and bytes
//! - raw device name and physical location
//! - bus type, vendor and product IDs
//!
//! This is the lowest layer of thermohid. The report decoder reads from the
//! [`HidrawDevice`] handle provided here.

pub mod error;
pub mod hidraw;
pub mod info;

#[cfg(target_os = "linux")]
mod ioctl;

pub use error::{DeviceError, Result};
pub use hidraw::HidrawDevice;
pub use info::{bus_name, DeviceInfo, RawInfo};
