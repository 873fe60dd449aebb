//! Timestamp resolution for raw slots.

use crate::normalizer::coerce_f64;
use crate::types::raw_slot::RawSlot;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Naive layouts accepted after RFC 3339. `%.f` also matches an absent fraction.
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a provider timestamp into UTC.
///
/// RFC 3339 strings are converted from their offset; naive date-times (space or `T`
/// separated, with or without seconds) and bare dates are taken as UTC. Returns `None`
/// for anything else, including blank strings.
///
/// # Examples
///
/// ```rust
/// use forecast_digest::parse_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let expected = Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap();
/// assert_eq!(parse_timestamp("2024-01-01 03:00:00"), Some(expected));
/// assert_eq!(parse_timestamp("2024-01-01T03:00"), Some(expected));
/// assert_eq!(parse_timestamp("2024-01-01T05:00:00+02:00"), Some(expected));
/// assert_eq!(parse_timestamp("tomorrow"), None);
/// ```
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

/// Resolves the timestamp of a raw slot: `dt_txt` first, then the unix-seconds `dt`.
///
/// `dt` is coerced like any other numeric leaf, so floats and numeric strings are
/// accepted. Fractional seconds are truncated toward the past.
pub fn slot_timestamp(slot: &RawSlot) -> Option<DateTime<Utc>> {
    let from_text = match slot.dt_txt.as_ref() {
        Some(Value::String(text)) => parse_timestamp(text),
        _ => None,
    };
    from_text.or_else(|| {
        coerce_f64(slot.dt.as_ref())
            .and_then(|seconds| DateTime::from_timestamp(seconds.floor() as i64, 0))
    })
}
