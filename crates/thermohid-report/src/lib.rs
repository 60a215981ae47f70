//! Report decoding for a two-channel temperature/humidity HID sensor.
//!
//! The sensor interleaves two input reports on one hidraw node:
//! - humidity: 2 bytes, tag `0x02`, one raw byte in half-percent steps
//! - temperature: 3 bytes, tag `0x03`, a little-endian u16 in tenths of a
//!   degree offset by -200 °C
//!
//! [`ReportDecoder`] pairs the two and yields a [`ReadingPair`] once both have
//! arrived. [`Monitor`] drives read → decode → emit until the stream ends, a
//! report fails validation, or its cancellation token fires.

pub mod codec;
pub mod decoder;
pub mod emitter;
pub mod error;
pub mod monitor;
pub mod reader;
pub mod tag;

#[cfg(feature = "async")]
pub mod async_reader;

pub use codec::{humidity_percent, parse_report, temperature_celsius, Measurement};
pub use decoder::{DecodeResult, PendingPair, ReadingPair, ReportDecoder};
pub use emitter::{display_line, log_record, DisplaySink, LogSink, PairEmitter, PairSink};
pub use error::{InvalidReport, ReportError, Result};
pub use monitor::{Monitor, MonitorStats, StopReason};
pub use reader::{RawFrame, ReportReader};
pub use tag::{ReportTag, HUMIDITY, MAX_REPORT_LEN, TEMPERATURE};

#[cfg(feature = "async")]
pub use async_reader::AsyncReportReader;

pub use tokio_util::sync::CancellationToken;
