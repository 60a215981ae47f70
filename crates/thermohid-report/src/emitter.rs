use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::decoder::ReadingPair;
use crate::error::{ReportError, Result};

/// Human-readable display line for a pair.
pub fn display_line(pair: &ReadingPair) -> String {
    format!(
        "Temperature = {:.3}°C Humidity = {:.1}%",
        pair.temperature_celsius, pair.humidity_percent
    )
}

/// Log file record for a pair: `<temperature> <humidity>`.
pub fn log_record(pair: &ReadingPair) -> String {
    format!(
        "{:.6} {:.6}",
        pair.temperature_celsius, pair.humidity_percent
    )
}

/// Destination for completed pairs.
pub trait PairSink {
    /// Write one pair. `sequence` starts at 1 and increases by one per emitted pair.
    fn write_pair(&mut self, sequence: u64, pair: &ReadingPair) -> std::io::Result<()>;
}

impl<S: PairSink + ?Sized> PairSink for Box<S> {
    fn write_pair(&mut self, sequence: u64, pair: &ReadingPair) -> std::io::Result<()> {
        (**self).write_pair(sequence, pair)
    }
}

/// Writes [`display_line`] output, one line per pair.
#[derive(Debug)]
pub struct DisplaySink<W> {
    inner: W,
}

impl<W: Write> DisplaySink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> PairSink for DisplaySink<W> {
    fn write_pair(&mut self, _sequence: u64, pair: &ReadingPair) -> std::io::Result<()> {
        writeln!(self.inner, "{}", display_line(pair))?;
        flush(&mut self.inner)
    }
}

/// Writes [`log_record`] lines to a log file.
#[derive(Debug)]
pub struct LogSink<W> {
    inner: W,
}

impl LogSink<File> {
    /// Create (or truncate) the log file.
    pub fn create(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let file = File::create(path)?;
        debug!(?path, "opened log file");
        Ok(Self::new(file))
    }
}

impl<W: Write> LogSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> PairSink for LogSink<W> {
    fn write_pair(&mut self, _sequence: u64, pair: &ReadingPair) -> std::io::Result<()> {
        writeln!(self.inner, "{}", log_record(pair))?;
        flush(&mut self.inner)
    }
}

fn flush<W: Write>(inner: &mut W) -> std::io::Result<()> {
    loop {
        match inner.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
}

/// Hands completed pairs to the display and, if configured, the log.
#[derive(Debug)]
pub struct PairEmitter<D, L> {
    display: D,
    log: Option<L>,
    emitted: u64,
}

impl<D: PairSink, L: PairSink> PairEmitter<D, L> {
    pub fn new(display: D, log: Option<L>) -> Self {
        Self {
            display,
            log,
            emitted: 0,
        }
    }

    /// Write a pair to the display, then to the log.
    pub fn emit(&mut self, pair: ReadingPair) -> Result<()> {
        let sequence = self.emitted + 1;

        self.display
            .write_pair(sequence, &pair)
            .map_err(|source| ReportError::Sink {
                sink: "display",
                source,
            })?;
        if let Some(log) = self.log.as_mut() {
            log.write_pair(sequence, &pair)
                .map_err(|source| ReportError::Sink {
                    sink: "log",
                    source,
                })?;
        }

        self.emitted = sequence;
        info!(
            sequence,
            temperature_celsius = pair.temperature_celsius,
            humidity_percent = pair.humidity_percent,
            "reading emitted"
        );
        Ok(())
    }

    /// Number of pairs emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn log(&self) -> Option<&L> {
        self.log.as_ref()
    }

    /// Consume the emitter and return its sinks.
    pub fn into_parts(self) -> (D, Option<L>) {
        (self.display, self.log)
    }
}
