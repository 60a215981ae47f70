//! Report tags.
//!
//! The first byte of every input report identifies its type; each type has a
//! fixed length.

/// Humidity report tag.
pub const HUMIDITY: u8 = 0x02;

/// Temperature report tag.
pub const TEMPERATURE: u8 = 0x03;

/// Length of a humidity report: tag + 1 data byte.
pub const HUMIDITY_REPORT_LEN: usize = 2;

/// Length of a temperature report: tag + 2 data bytes.
pub const TEMPERATURE_REPORT_LEN: usize = 3;

/// Largest report the sensor produces; every read requests this many bytes.
pub const MAX_REPORT_LEN: usize = TEMPERATURE_REPORT_LEN;

/// Known report types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportTag {
    Humidity,
    Temperature,
}

impl ReportTag {
    /// Classify a leading byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            HUMIDITY => Some(Self::Humidity),
            TEMPERATURE => Some(Self::Temperature),
            _ => None,
        }
    }

    /// The tag byte on the wire.
    pub fn byte(self) -> u8 {
        match self {
            Self::Humidity => HUMIDITY,
            Self::Temperature => TEMPERATURE,
        }
    }

    /// The only valid report length for this tag.
    pub fn report_len(self) -> usize {
        match self {
            Self::Humidity => HUMIDITY_REPORT_LEN,
            Self::Temperature => TEMPERATURE_REPORT_LEN,
        }
    }
}

/// Returns a human-readable name for a tag byte.
pub fn tag_name(byte: u8) -> &'static str {
    match byte {
        HUMIDITY => "HUMIDITY",
        TEMPERATURE => "TEMPERATURE",
        _ => "UNKNOWN",
    }
}
