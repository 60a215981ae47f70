use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ValueEnum;
use serde::Serialize;
use thermohid_device::{bus_name, DeviceInfo};
use thermohid_report::{DisplaySink, PairSink, ReadingPair};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    /// `Temperature = ...°C Humidity = ...%` lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// The display sink for `format`, writing to stdout.
pub fn display_sink(format: OutputFormat) -> Box<dyn PairSink> {
    match format {
        OutputFormat::Text => Box::new(DisplaySink::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonDisplaySink::new(io::stdout())),
    }
}

#[derive(Serialize)]
struct ReadingOutput {
    sequence: u64,
    temperature_celsius: f64,
    humidity_percent: f64,
    timestamp: String,
}

/// Writes each pair as a JSON object on its own line.
pub struct JsonDisplaySink<W> {
    inner: W,
}

impl<W: Write> JsonDisplaySink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> PairSink for JsonDisplaySink<W> {
    fn write_pair(&mut self, sequence: u64, pair: &ReadingPair) -> io::Result<()> {
        let out = ReadingOutput {
            sequence,
            temperature_celsius: pair.temperature_celsius,
            humidity_percent: pair.humidity_percent,
            timestamp: now_unix_seconds(),
        };
        serde_json::to_writer(&mut self.inner, &out)?;
        writeln!(self.inner)?;
        self.inner.flush()
    }
}

#[derive(Serialize)]
struct RawInfoOutput {
    bustype: u32,
    bus: &'static str,
    vendor: String,
    product: String,
}

#[derive(Serialize)]
struct DeviceInfoOutput<'a> {
    device: String,
    descriptor_size: Option<u32>,
    report_descriptor: Option<String>,
    name: Option<&'a str>,
    phys: Option<&'a str>,
    raw_info: Option<RawInfoOutput>,
}

/// Write the device diagnostics block to `out`.
pub fn write_device_info<W: Write>(
    out: &mut W,
    path: &Path,
    info: &DeviceInfo,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let record = DeviceInfoOutput {
                device: path.display().to_string(),
                descriptor_size: info.descriptor_size,
                report_descriptor: info.descriptor_hex(),
                name: info.name.as_deref(),
                phys: info.phys.as_deref(),
                raw_info: info.raw.map(|raw| RawInfoOutput {
                    bustype: raw.bustype,
                    bus: bus_name(raw.bustype),
                    vendor: format!("{:#06x}", raw.vendor),
                    product: format!("{:#06x}", raw.product),
                }),
            };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for line in device_info_lines(info) {
                writeln!(out, "{line}")?;
            }
        }
    }
    out.flush()
}

fn device_info_lines(info: &DeviceInfo) -> Vec<String> {
    let raw = match info.raw {
        Some(raw) => format!(
            "bustype={:#06x} ({}) vendor={:#06x} product={:#06x}",
            raw.bustype,
            bus_name(raw.bustype),
            raw.vendor,
            raw.product
        ),
        None => UNAVAILABLE.to_string(),
    };

    vec![
        format!(
            "Report Descriptor Size: {}",
            or_unavailable(info.descriptor_size.map(|s| s.to_string()))
        ),
        format!(
            "Report Descriptor: {}",
            or_unavailable(info.descriptor_hex())
        ),
        format!("Name: {}", or_unavailable(info.name.clone())),
        format!("Raw Phys: {}", or_unavailable(info.phys.clone())),
        format!("Raw Info: {raw}"),
    ]
}

const UNAVAILABLE: &str = "unavailable";

fn or_unavailable(value: Option<String>) -> String {
    value.unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Written when the loop ends without error.
pub fn write_exiting<W: Write>(out: &mut W, format: OutputFormat) -> io::Result<()> {
    if matches!(format, OutputFormat::Text) {
        writeln!(out, "Exiting")?;
    }
    out.flush()
}

fn now_unix_seconds() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
