use std::io::{ErrorKind, Read};
use std::path::Path;

use thermohid_device::HidrawDevice;
use tracing::trace;

use crate::error::{ReportError, Result};
use crate::tag::{tag_name, MAX_REPORT_LEN};

/// The bytes returned by one read call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame {
    buf: [u8; MAX_REPORT_LEN],
    len: usize,
}

impl RawFrame {
    pub(crate) fn from_read(buf: [u8; MAX_REPORT_LEN], len: usize) -> Self {
        Self {
            buf,
            len: len.min(MAX_REPORT_LEN),
        }
    }

    /// The bytes actually returned by the read.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Leading byte of the frame.
    pub fn tag(&self) -> Option<u8> {
        self.as_bytes().first().copied()
    }
}

impl AsRef<[u8]> for RawFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Reads one report per call from any `Read` source.
///
/// Every read requests [`MAX_REPORT_LEN`] bytes. Message-oriented sources such
/// as hidraw return exactly one report per read; the frame holds however many
/// bytes came back.
#[derive(Debug)]
pub struct ReportReader<T> {
    inner: T,
    frames_read: u64,
}

impl<T: Read> ReportReader<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            frames_read: 0,
        }
    }

    /// Read the next report (blocking).
    ///
    /// Returns `Err(ReportError::StreamClosed)` when the read returns zero bytes.
    /// Interrupted reads are retried.
    pub fn read_report(&mut self) -> Result<RawFrame> {
        loop {
            let mut buf = [0u8; MAX_REPORT_LEN];
            let read = match self.inner.read(&mut buf) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(ReportError::Io(err)),
            };

            if read == 0 {
                return Err(ReportError::StreamClosed);
            }

            self.frames_read = self.frames_read.saturating_add(1);
            let frame = RawFrame::from_read(buf, read);
            trace!(
                kind = frame.tag().map_or("NONE", tag_name),
                bytes = ?frame.as_bytes(),
                "report read"
            );
            return Ok(frame);
        }
    }

    /// Number of non-empty reads so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Borrow the underlying source.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying source.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner source.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl ReportReader<HidrawDevice> {
    /// Open a hidraw node and wrap it in a reader.
    pub fn open(path: impl AsRef<Path>) -> thermohid_device::Result<Self> {
        Ok(Self::new(HidrawDevice::open(path)?))
    }
}
