//! Match datetime parsing and ISO-8601 rendering.
//!
//! The document store may hand back datetimes as RFC 3339 strings with an
//! offset, as naive ISO-8601 strings, or wrapped in extended JSON
//! (`{"$date": ...}`). All of them are normalised to a naive UTC datetime.

use chrono::{DateTime, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serializer};

use crate::error::AppError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a match datetime string into naive UTC.
pub fn parse_match_datetime(raw: &str) -> Result<NaiveDateTime, AppError> {
    let trimmed = raw.trim();

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(with_offset.naive_utc());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| AppError::datetime_parse_error(format!("Unrecognised datetime: {raw}")))
}

/// Renders a datetime as ISO-8601 without offset. Fractional seconds are
/// only written when non-zero, and then always as microseconds.
pub fn format_iso(datetime: &NaiveDateTime) -> String {
    if datetime.nanosecond() == 0 {
        datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        datetime.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDateTime {
    Text(String),
    Extended {
        #[serde(rename = "$date")]
        date: ExtendedDate,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExtendedDate {
    Text(String),
    Millis(i64),
    Canonical {
        #[serde(rename = "$numberLong")]
        number_long: String,
    },
}

fn from_millis(millis: i64) -> Result<NaiveDateTime, AppError> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| AppError::datetime_parse_error(format!("Timestamp out of range: {millis}")))
}

/// Serde adapter for match datetimes on [`crate::models::PredictionRecord`].
pub mod match_datetime {
    use super::*;

    pub fn serialize<S>(datetime: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_iso(datetime))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match RawDateTime::deserialize(deserializer)? {
            RawDateTime::Text(text) => parse_match_datetime(&text),
            RawDateTime::Extended { date } => match date {
                ExtendedDate::Text(text) => parse_match_datetime(&text),
                ExtendedDate::Millis(millis) => from_millis(millis),
                ExtendedDate::Canonical { number_long } => number_long
                    .parse::<i64>()
                    .map_err(|e| AppError::datetime_parse_error(e.to_string()))
                    .and_then(from_millis),
            },
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
