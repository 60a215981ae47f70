use tracing::trace;

use crate::codec::{parse_report, Measurement};
use crate::error::InvalidReport;

/// A completed temperature/humidity reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingPair {
    pub temperature_celsius: f64,
    pub humidity_percent: f64,
}

/// Values received since the last completed pair.
///
/// Holds at most one of each kind. A newer report of the same kind replaces
/// the pending value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PendingPair {
    temperature: Option<f64>,
    humidity: Option<f64>,
}

impl PendingPair {
    /// Pending temperature, if one has arrived.
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    /// Pending humidity, if one has arrived.
    pub fn humidity(&self) -> Option<f64> {
        self.humidity
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.humidity.is_none()
    }

    fn store(&mut self, measurement: Measurement) {
        match measurement {
            Measurement::Temperature(celsius) => self.temperature = Some(celsius),
            Measurement::Humidity(percent) => self.humidity = Some(percent),
        }
    }

    /// Drain both values if both are present.
    fn take_complete(&mut self) -> Option<ReadingPair> {
        match (self.temperature, self.humidity) {
            (Some(temperature_celsius), Some(humidity_percent)) => {
                *self = Self::default();
                Some(ReadingPair {
                    temperature_celsius,
                    humidity_percent,
                })
            }
            _ => None,
        }
    }
}

/// Outcome of feeding one report to the decoder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecodeResult {
    /// The report was stored; the pair is not complete yet.
    NoPairYet,
    /// The report completed a pair. Pending state has been cleared.
    PairReady(ReadingPair),
    /// The report failed validation. Pending state is untouched.
    Invalid(InvalidReport),
}

/// Stateful decoder pairing temperature and humidity reports.
#[derive(Debug, Default)]
pub struct ReportDecoder {
    pending: PendingPair,
}

impl ReportDecoder {
    /// Create a decoder with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one report and check whether it completes a pair.
    ///
    /// Only the bytes actually returned by the read should be passed in.
    pub fn decode(&mut self, report: &[u8]) -> DecodeResult {
        let measurement = match parse_report(report) {
            Ok(measurement) => measurement,
            Err(invalid) => return DecodeResult::Invalid(invalid),
        };
        trace!(?measurement, "report decoded");

        self.pending.store(measurement);
        self.check_pair()
    }

    /// Emit the pending pair if both values are present.
    ///
    /// Calling this again without new reports returns `NoPairYet`.
    pub fn check_pair(&mut self) -> DecodeResult {
        match self.pending.take_complete() {
            Some(pair) => DecodeResult::PairReady(pair),
            None => DecodeResult::NoPairYet,
        }
    }

    /// Current pending state.
    pub fn pending(&self) -> &PendingPair {
        &self.pending
    }
}
