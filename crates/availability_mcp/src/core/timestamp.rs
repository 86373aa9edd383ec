//! Parsing of slot boundaries into naive or offset-aware timestamps.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime};

use crate::core::error::{AvailabilityError, AvailabilityResult};

/// Accepted layouts for timestamps with an offset that are not strict RFC 3339
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// Accepted layouts for timestamps that carry no offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A slot boundary as supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    /// Wall-clock value with no zone attached
    Naive(NaiveDateTime),
    /// Instant with an explicit UTC offset
    Aware(DateTime<FixedOffset>),
}

impl Timestamp {
    pub fn is_naive(&self) -> bool {
        matches!(self, Timestamp::Naive(_))
    }
}

impl FromStr for Timestamp {
    type Err = AvailabilityError;

    fn from_str(value: &str) -> AvailabilityResult<Self> {
        let value = value.trim();

        if let Ok(aware) = DateTime::parse_from_rfc3339(value) {
            return Ok(Timestamp::Aware(aware));
        }

        if let Some(aware) = parse_with_offset(value) {
            return Ok(Timestamp::Aware(aware));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .map(Timestamp::Naive)
            .ok_or_else(|| AvailabilityError::InvalidTimestamp {
                value: value.to_string(),
            })
    }
}

/// Offset-aware layouts chrono's RFC 3339 parser refuses, such as
/// `2024-03-20T09:00-04:00`, `2024-03-20T09:00Z` or `2024-03-20T09:00:00+0400`
fn parse_with_offset(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = match value.strip_suffix(['Z', 'z']) {
        Some(utc) => format!("{utc}+00:00"),
        None => value.to_string(),
    };

    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&value, format).ok())
}
