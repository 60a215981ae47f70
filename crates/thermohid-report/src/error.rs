/// A report whose (length, tag) combination is not a known report type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("garbage read ({len}-byte report, tag {})", tag_label(.tag))]
pub struct InvalidReport {
    /// Number of bytes the read returned.
    pub len: usize,
    /// Leading byte, if the read returned any.
    pub tag: Option<u8>,
}

fn tag_label(tag: &Option<u8>) -> String {
    match tag {
        Some(byte) => format!("{byte:#04x}"),
        None => "none".to_string(),
    }
}

/// Errors that can occur while reading, decoding or emitting reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// A report failed tag/length validation.
    #[error(transparent)]
    Invalid(#[from] InvalidReport),

    /// An I/O error occurred while reading from the device.
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The device returned end-of-stream.
    #[error("device stream closed")]
    StreamClosed,

    /// A display or log sink could not be written.
    #[error("failed to write {sink} record: {source}")]
    Sink {
        sink: &'static str,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;
