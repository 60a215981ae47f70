use crate::error::InvalidReport;
use crate::tag::ReportTag;

/// A single decoded sensor value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Degrees Celsius.
    Temperature(f64),
    /// Relative humidity in percent.
    Humidity(f64),
}

/// Convert a raw temperature register value to degrees Celsius.
pub fn temperature_celsius(raw: u16) -> f64 {
    -200.0 + f64::from(raw) * 0.1
}

/// Convert a raw humidity byte to percent.
pub fn humidity_percent(raw: u8) -> f64 {
    0.5 * f64::from(raw)
}

/// Decode one input report.
///
/// Report layout:
/// ```text
/// temperature: ┌──────┬──────────┬───────────┐
///              │ 0x03 │ low byte │ high byte │
///              └──────┴──────────┴───────────┘
/// humidity:    ┌──────┬──────────┐
///              │ 0x02 │ value    │
///              └──────┴──────────┘
/// ```
///
/// The tag and the length are both checked; a known tag with the other
/// report's length is rejected.
pub fn parse_report(report: &[u8]) -> Result<Measurement, InvalidReport> {
    let invalid = InvalidReport {
        len: report.len(),
        tag: report.first().copied(),
    };

    let tag = report
        .first()
        .copied()
        .and_then(ReportTag::from_byte)
        .ok_or(invalid)?;
    if report.len() != tag.report_len() {
        return Err(invalid);
    }

    let measurement = match tag {
        ReportTag::Temperature => {
            let raw = u16::from_le_bytes([report[1], report[2]]);
            Measurement::Temperature(temperature_celsius(raw))
        }
        ReportTag::Humidity => Measurement::Humidity(humidity_percent(report[1])),
    };
    Ok(measurement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_report_is_little_endian() {
        let m = parse_report(&[0x03, 0x00, 0x0A]).unwrap();
        assert_eq!(m, Measurement::Temperature(56.0));

        let m = parse_report(&[0x03, 0xD0, 0x07]).unwrap();
        assert_eq!(m, Measurement::Temperature(temperature_celsius(2000)));
    }

    #[test]
    fn humidity_report_is_half_percent_steps() {
        assert_eq!(
            parse_report(&[0x02, 0x28]).unwrap(),
            Measurement::Humidity(20.0)
        );
        assert_eq!(
            parse_report(&[0x02, 0xFF]).unwrap(),
            Measurement::Humidity(127.5)
        );
    }

    #[test]
    fn temperature_covers_full_register_range() {
        for raw in 0..=u16::MAX {
            let [lo, hi] = raw.to_le_bytes();
            let m = parse_report(&[0x03, lo, hi]).unwrap();
            assert_eq!(m, Measurement::Temperature(-200.0 + 0.1 * f64::from(raw)));
        }
        assert_eq!(temperature_celsius(0), -200.0);
    }

    #[test]
    fn humidity_covers_full_byte_range() {
        for raw in 0..=u8::MAX {
            let m = parse_report(&[0x02, raw]).unwrap();
            assert_eq!(m, Measurement::Humidity(0.5 * f64::from(raw)));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = parse_report(&[0x01, 0x00, 0x00]).unwrap_err();
        assert_eq!(
            err,
            InvalidReport {
                len: 3,
                tag: Some(0x01)
            }
        );
    }

    #[test]
    fn length_tag_mismatch_is_rejected() {
        assert!(parse_report(&[0x03, 0x28]).is_err());
        assert!(parse_report(&[0x02, 0x00, 0x0A]).is_err());
    }

    #[test]
    fn truncated_and_empty_reports_are_rejected() {
        assert_eq!(
            parse_report(&[0x03]).unwrap_err(),
            InvalidReport {
                len: 1,
                tag: Some(0x03)
            }
        );
        assert_eq!(
            parse_report(&[]).unwrap_err(),
            InvalidReport { len: 0, tag: None }
        );
    }
}
