//! Display formatting for durations and backend timestamps

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

const SECS_PER_MINUTE: f64 = 60.0;
const SECS_PER_HOUR: f64 = 3600.0;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// ISO-8601 forms without an offset, read as local time
const NAIVE_ISO_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Placeholder shown for missing values
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a duration in seconds using the largest fitting unit
///
/// - `None` => "N/A"
/// - over an hour => "2.02hr"
/// - over a minute => "2.08min"
/// - otherwise => "45.20s"
pub fn format_duration(value: Option<f64>) -> String {
    let Some(secs) = value else {
        return NOT_AVAILABLE.to_string();
    };

    if secs > SECS_PER_HOUR {
        format!("{:.2}hr", secs / SECS_PER_HOUR)
    } else if secs > SECS_PER_MINUTE {
        format!("{:.2}min", secs / SECS_PER_MINUTE)
    } else {
        format!("{:.2}s", secs)
    }
}

/// Render an ISO-8601 timestamp in the local timezone
///
/// Timestamps without an offset are taken as local time.
pub fn format_timestamp(iso: &str) -> String {
    let iso = iso.trim();
    let local = match DateTime::parse_from_rfc3339(iso) {
        Ok(time) => Some(time.with_timezone(&Local)),
        Err(_) => NAIVE_ISO_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(iso, format).ok())
            .and_then(|naive| Local.from_local_datetime(&naive).earliest()),
    };

    match local {
        Some(time) => time.format(TIMESTAMP_FORMAT).to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Last-updated readout for the date-range form
pub fn format_last_updated(last_updated: &str) -> String {
    if last_updated.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        format_timestamp(last_updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_format_duration() {
        struct TestCase {
            input: Option<f64>,
            expected: &'static str,
        }

        let tests = vec![
            TestCase {
                // TC0: absent value
                input: None,
                expected: "N/A",
            },
            TestCase {
                // TC1: seconds
                input: Some(45.2),
                expected: "45.20s",
            },
            TestCase {
                // TC2: exactly one minute stays in seconds
                input: Some(60.0),
                expected: "60.00s",
            },
            TestCase {
                // TC3: minutes
                input: Some(125.0),
                expected: "2.08min",
            },
            TestCase {
                // TC4: exactly one hour stays in minutes
                input: Some(3600.0),
                expected: "60.00min",
            },
            TestCase {
                // TC5: hours
                input: Some(7260.0),
                expected: "2.02hr",
            },
            TestCase {
                // TC6: zero
                input: Some(0.0),
                expected: "0.00s",
            },
            TestCase {
                // TC7: negative values fall through to seconds
                input: Some(-5.0),
                expected: "-5.00s",
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = format_duration(test.input);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_format_duration_unit_boundaries() {
        for secs in [0.5, 12.0, 59.99, 60.0] {
            assert!(format_duration(Some(secs)).ends_with('s'));
            assert!(!format_duration(Some(secs)).ends_with("min"));
        }
        for secs in [60.01, 600.0, 3600.0] {
            assert!(format_duration(Some(secs)).ends_with("min"));
        }
        for secs in [3600.01, 86_400.0] {
            assert!(format_duration(Some(secs)).ends_with("hr"));
        }
    }

    #[test]
    fn test_format_timestamp_is_local() {
        let iso = "2024-01-01T00:00:00Z";
        let expected = DateTime::parse_from_rfc3339(iso)
            .unwrap()
            .with_timezone(&Utc)
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();

        assert_eq!(format_timestamp(iso), expected);
        assert_eq!(format_timestamp("not a date"), "Invalid Date");
    }

    #[test]
    fn test_format_timestamp_without_offset() {
        struct TestCase {
            input: &'static str,
            expected: &'static str,
        }

        let tests = vec![
            TestCase {
                // TC0: no offset is local wall-clock time
                input: "2024-01-01T00:00:00",
                expected: "2024-01-01 00:00:00",
            },
            TestCase {
                // TC1: fractional seconds are dropped
                input: "2024-01-01T00:00:00.123456",
                expected: "2024-01-01 00:00:00",
            },
            TestCase {
                // TC2: space separator
                input: "2024-06-15 13:45:30",
                expected: "2024-06-15 13:45:30",
            },
            TestCase {
                // TC3: date only is not a timestamp
                input: "2024-01-01",
                expected: "Invalid Date",
            },
            TestCase {
                // TC4: out of range fields
                input: "2024-13-01T00:00:00",
                expected: "Invalid Date",
            },
        ];

        for (index, test) in tests.into_iter().enumerate() {
            let actual = format_timestamp(test.input);
            assert_eq!(actual, test.expected, "TC{} failed", index);
        }
    }

    #[test]
    fn test_format_last_updated() {
        assert_eq!(format_last_updated(""), "N/A");
        assert_eq!(
            format_last_updated("2024-01-01T00:00:00Z"),
            format_timestamp("2024-01-01T00:00:00Z")
        );
    }
}
