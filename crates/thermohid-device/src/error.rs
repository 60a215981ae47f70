use std::path::PathBuf;

/// Errors that can occur while opening or probing a hidraw device.
#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    /// The device node could not be opened.
    #[error("couldn't open device {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A descriptor query was rejected by the kernel.
    #[error("{request} failed: {source}")]
    Ioctl {
        request: &'static str,
        source: std::io::Error,
    },

    /// Descriptor queries are only available on Linux.
    #[error("hidraw descriptor queries are not supported on this platform")]
    Unsupported,
}

pub type Result<T> = std::result::Result<T, DeviceError>;
