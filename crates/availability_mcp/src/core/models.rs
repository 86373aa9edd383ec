use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::error::{AvailabilityError, AvailabilityResult};
use crate::core::normalize;

pub const DEFAULT_OUTPUT_FORMAT: &str = "continuous";
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 30;

/// Helper function to deserialize and trim strings
fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Trim an optional string, treating blank values as absent
fn deserialize_optional_trimmed_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

fn default_output_format() -> String {
    DEFAULT_OUTPUT_FORMAT.to_string()
}

fn default_granularity_minutes() -> i64 {
    i64::from(DEFAULT_GRANULARITY_MINUTES)
}

/// Layout of the generated text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One `start - end` row per slot
    Continuous,
    /// One row per fixed-size interval inside each slot
    Chunks,
}

impl OutputMode {
    pub const ALL: [OutputMode; 2] = [OutputMode::Continuous, OutputMode::Chunks];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Continuous => "continuous",
            OutputMode::Chunks => "chunks",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> AvailabilityResult<Self> {
        match s {
            "continuous" => Ok(OutputMode::Continuous),
            "chunks" => Ok(OutputMode::Chunks),
            other => Err(AvailabilityError::InvalidOutputMode {
                format: other.to_string(),
            }),
        }
    }
}

/// Chunk size in minutes, always positive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Granularity(NonZeroU32);

impl Granularity {
    pub fn new(minutes: u32) -> Option<Self> {
        NonZeroU32::new(minutes).map(Self)
    }

    pub fn minutes(self) -> u32 {
        self.0.get()
    }

    pub fn as_duration(self) -> Duration {
        Duration::minutes(i64::from(self.0.get()))
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Self(NonZeroU32::new(DEFAULT_GRANULARITY_MINUTES).unwrap_or(NonZeroU32::MIN))
    }
}

impl TryFrom<i64> for Granularity {
    type Error = AvailabilityError;

    fn try_from(minutes: i64) -> AvailabilityResult<Self> {
        u32::try_from(minutes)
            .ok()
            .and_then(Granularity::new)
            .ok_or(AvailabilityError::InvalidGranularity { minutes })
    }
}

/// A slot whose boundaries are tagged with an explicit zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZonedSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl ZonedSlot {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    /// The same instants expressed in `timezone`
    pub fn in_timezone(&self, timezone: Tz) -> Self {
        Self {
            start: normalize::convert(&self.start, timezone),
            end: normalize::convert(&self.end, timezone),
        }
    }
}

/// One selected availability slot
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct SlotRequest {
    /// Start of the slot, ISO 8601 (e.g. '2024-03-20T09:00:00-04:00' or '2024-03-20T09:00:00')
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub start: String,
    /// End of the slot, same format as start
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub end: String,
    /// IANA timezone of start/end values that carry no offset. Defaults to the user's timezone
    #[serde(default, deserialize_with = "deserialize_optional_trimmed_string")]
    pub timezone: Option<String>,
}

/// Request to turn availability slots into text
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct GenerateAvailabilityRequest {
    /// List of selected time slots
    pub selected_slots: Vec<SlotRequest>,
    /// User's IANA timezone name (e.g., 'America/New_York')
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    pub user_timezone: String,
    /// Recipient's IANA timezone name, adds a second time column when present
    #[serde(default, deserialize_with = "deserialize_optional_trimmed_string")]
    pub recipient_timezone: Option<String>,
    /// Output layout: 'continuous' or 'chunks'
    #[serde(default = "default_output_format")]
    pub output_format: String,
    /// Minutes per chunk (used if output_format is 'chunks')
    #[serde(default = "default_granularity_minutes")]
    pub slot_granularity_minutes: i64,
    /// Shared secret, required when the server is started with an API key
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Generated availability text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AvailabilityResponse {
    /// Formatted text output of availability
    pub text_output: String,
    /// User's timezone
    pub user_timezone: String,
    /// Recipient's timezone
    pub recipient_timezone: Option<String>,
}
