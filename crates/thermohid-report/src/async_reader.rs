use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::error::{ReportError, Result};
use crate::reader::RawFrame;
use crate::tag::{tag_name, MAX_REPORT_LEN};

/// Async counterpart of [`crate::ReportReader`].
///
/// Reads one report per call from any `AsyncRead` source, e.g. a
/// `tokio::fs::File` opened on a hidraw node.
#[derive(Debug)]
pub struct AsyncReportReader<T> {
    inner: T,
    frames_read: u64,
}

impl<T: AsyncRead + Unpin> AsyncReportReader<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            frames_read: 0,
        }
    }

    /// Read the next report.
    ///
    /// Returns `Err(ReportError::StreamClosed)` when the read returns zero bytes.
    pub async fn read_report(&mut self) -> Result<RawFrame> {
        loop {
            let mut buf = [0u8; MAX_REPORT_LEN];
            let read = match self.inner.read(&mut buf).await {
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

    /// Consume the reader and return the inner source.
    pub fn into_inner(self) -> T {
        self.inner
    }
}
