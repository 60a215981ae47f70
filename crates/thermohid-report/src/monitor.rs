use std::io::Read;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::decoder::{DecodeResult, ReportDecoder};
use crate::emitter::{PairEmitter, PairSink};
use crate::error::{ReportError, Result};
use crate::reader::ReportReader;

/// Why [`Monitor::run`] returned without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cancellation token fired.
    Cancelled,
    /// The device returned end-of-stream.
    EndOfStream,
}

/// Counters for one monitor run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    pub frames_read: u64,
    pub pairs_emitted: u64,
}

/// The read → decode → emit loop.
///
/// Owns the reader, the decoder (and with it the pending pair) and the emitter.
pub struct Monitor<R, D, L> {
    reader: ReportReader<R>,
    decoder: ReportDecoder,
    emitter: PairEmitter<D, L>,
}

impl<R: Read, D: PairSink, L: PairSink> Monitor<R, D, L> {
    pub fn new(reader: ReportReader<R>, emitter: PairEmitter<D, L>) -> Self {
        Self {
            reader,
            decoder: ReportDecoder::new(),
            emitter,
        }
    }

    /// Run until `stop` is cancelled, the stream ends, or a report is invalid.
    ///
    /// `stop` is checked once per iteration, before each read. A read already
    /// blocked on the device is not interrupted; the loop exits after that
    /// report has been handled.
    pub fn run(&mut self, stop: &CancellationToken) -> Result<StopReason> {
        while !stop.is_cancelled() {
            let frame = match self.reader.read_report() {
                Ok(frame) => frame,
                Err(ReportError::StreamClosed) => {
                    info!("device stream closed");
                    return Ok(StopReason::EndOfStream);
                }
                Err(err) => return Err(err),
            };

            match self.decoder.decode(frame.as_bytes()) {
                DecodeResult::NoPairYet => {}
                DecodeResult::PairReady(pair) => self.emitter.emit(pair)?,
                DecodeResult::Invalid(invalid) => return Err(invalid.into()),
            }
        }

        debug!("stop requested");
        Ok(StopReason::Cancelled)
    }

    pub fn stats(&self) -> MonitorStats {
        MonitorStats {
            frames_read: self.reader.frames_read(),
            pairs_emitted: self.emitter.emitted(),
        }
    }

    pub fn decoder(&self) -> &ReportDecoder {
        &self.decoder
    }

    pub fn emitter(&self) -> &PairEmitter<D, L> {
        &self.emitter
    }

    /// Consume the monitor, returning the source and the emitter.
    pub fn into_parts(self) -> (R, PairEmitter<D, L>) {
        (self.reader.into_inner(), self.emitter)
    }
}
