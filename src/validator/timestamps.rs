//! ISO 8601 timestamp validation.
//!
//! Any keyword containing the substring `timestamp` anywhere in its name is
//! treated as carrying a timestamp. The substring match is deliberately
//! unanchored: `start_timestamp`, `end_timestamp` and `timestamp_utc` are all
//! picked up. The bare keyword `timestamp` itself is independently prohibited
//! by the keyword rules.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::ComplianceError;
use crate::channel::{Channel, Value};

/// Substring marking a keyword as carrying an ISO 8601 timestamp.
const TIMESTAMP_MARKER: &str = "timestamp";

/// Date-time layouts without a UTC offset, `T`- and space-separated.
/// `%.f` also matches the no-fraction case.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Offset-carrying layouts not already covered by RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Check that every timestamp keyword holds an ISO 8601 date-time string.
///
/// Values under timestamp keywords must be text; a non-string value fails the
/// same way a malformed string does. The first offending keyword aborts the
/// check and is named in the error.
pub fn check_timestamps(channel: &Channel) -> Result<(), ComplianceError> {
    for (key, value) in channel {
        if !key.contains(TIMESTAMP_MARKER) {
            continue;
        }

        let text = match value {
            Value::Text(text) => text,
            other => {
                return Err(ComplianceError::MalformedTimestamp {
                    key: key.clone(),
                    value: other.type_name().to_string(),
                })
            }
        };

        if !is_iso8601(text) {
            return Err(ComplianceError::MalformedTimestamp {
                key: key.clone(),
                value: text.clone(),
            });
        }
    }

    Ok(())
}

/// Accept the envelope of a standard ISO 8601 parser: date-only, date-time
/// with `T` or space separator, with or without seconds, fractional seconds
/// and UTC offset. Slash-delimited dates and other non-ISO layouts fail.
fn is_iso8601(text: &str) -> bool {
    if DateTime::parse_from_rfc3339(text).is_ok() {
        return true;
    }
    if NAIVE_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
    {
        return true;
    }
    if OFFSET_FORMATS
        .iter()
        .any(|format| DateTime::parse_from_str(text, format).is_ok())
    {
        return true;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::is_iso8601;

    #[test]
    fn accepts_the_iso8601_envelope() {
        for text in [
            "2023-08-23",
            "2023-08-23T12:00",
            "2023-08-23T12:00:00",
            "2023-08-23 12:00:00",
            "2023-08-23 12:00:00.123456",
            "2023-08-23T12:00:00.123456",
            "2023-08-23T12:00:00Z",
            "2023-08-23T12:00:00+02:00",
            "2023-08-23T12:00:00.500-05:00",
            "2023-08-23 12:00:00+02:00",
        ] {
            assert!(is_iso8601(text), "{text} should parse as ISO 8601");
        }
    }

    #[test]
    fn rejects_non_iso_layouts() {
        for text in [
            "2023/08/23 1200",
            "23-08-2023",
            "2023-08-23T25:00:00",
            "August 23rd 2023",
            "1692792000",
            "",
        ] {
            assert!(!is_iso8601(text), "{text} should not parse as ISO 8601");
        }
    }
}
