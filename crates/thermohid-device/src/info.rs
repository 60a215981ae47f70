//! Descriptor metadata reported by a hidraw device.

/// Bus, vendor and product identification (`struct hidraw_devinfo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInfo {
    pub bustype: u32,
    pub vendor: u16,
    pub product: u16,
}

/// Everything the startup diagnostics print about a device.
///
/// Each field is probed independently; a field is `None` when its query failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub descriptor_size: Option<u32>,
    pub report_descriptor: Option<Vec<u8>>,
    pub name: Option<String>,
    pub phys: Option<String>,
    pub raw: Option<RawInfo>,
}

impl DeviceInfo {
    /// Report descriptor rendered as space-separated lowercase hex bytes.
    pub fn descriptor_hex(&self) -> Option<String> {
        self.report_descriptor.as_ref().map(|bytes| {
            bytes
                .iter()
                .map(|b| format!("{b:x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    /// True when no query succeeded (e.g. the path is not a hidraw node).
    pub fn is_empty(&self) -> bool {
        self.descriptor_size.is_none()
            && self.report_descriptor.is_none()
            && self.name.is_none()
            && self.phys.is_none()
            && self.raw.is_none()
    }
}

/// Returns a human-readable name for a `BUS_*` constant from `linux/input.h`.
pub fn bus_name(bustype: u32) -> &'static str {
    match bustype {
        0x01 => "PCI",
        0x02 => "ISAPNP",
        0x03 => "USB",
        0x04 => "HIL",
        0x05 => "BLUETOOTH",
        0x06 => "VIRTUAL",
        0x18 => "I2C",
        0x19 => "HOST",
        0x1C => "SPI",
        _ => "OTHER",
    }
}
