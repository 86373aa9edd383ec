//! Timezone normalization.
//!
//! Every slot boundary is turned into a `DateTime<Tz>` before rendering:
//! naive wall-clock values are tagged with the zone they are normalized into
//! (their clock value is kept), while values that already carry an offset are
//! converted with the instant preserved.

use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

use crate::core::{
    error::{AvailabilityError, AvailabilityResult},
    timestamp::Timestamp,
};

/// Resolve an IANA timezone identifier
pub fn parse_timezone(timezone_name: &str) -> AvailabilityResult<Tz> {
    Tz::from_str(timezone_name).map_err(|_| AvailabilityError::InvalidTimezone {
        timezone: timezone_name.to_string(),
    })
}

/// Express a timestamp as wall-clock time in the zone named `target`.
///
/// # Errors
///
/// [`AvailabilityError::InvalidTimezone`] if `target` is not in the IANA database,
/// [`AvailabilityError::NonexistentLocalTime`] if a naive value falls in a DST gap.
pub fn normalize(timestamp: &Timestamp, target: &str) -> AvailabilityResult<DateTime<Tz>> {
    let timezone = parse_timezone(target)?;
    normalize_in(timestamp, timezone)
}

/// Same as [`normalize`] with an already resolved zone.
///
/// A naive value that is ambiguous (DST fold) resolves to its first occurrence.
pub fn normalize_in(timestamp: &Timestamp, timezone: Tz) -> AvailabilityResult<DateTime<Tz>> {
    match timestamp {
        Timestamp::Naive(naive) => timezone
            .from_local_datetime(naive)
            .earliest()
            .ok_or_else(|| AvailabilityError::NonexistentLocalTime {
                value: naive.to_string(),
                timezone: timezone.to_string(),
            }),
        Timestamp::Aware(aware) => Ok(aware.with_timezone(&timezone)),
    }
}

/// Project a tagged instant into another zone
pub fn convert(datetime: &DateTime<Tz>, target: Tz) -> DateTime<Tz> {
    datetime.with_timezone(&target)
}
