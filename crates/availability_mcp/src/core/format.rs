//! Date, time and header labels shared by both layouts.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

// Format strings shared by both layouts
pub const DATE_LABEL_FORMAT: &str = "%a, %b %d";
pub const TIME_LABEL_FORMAT: &str = "%-I:%M %p";

pub const INTRO_LINE: &str = "Here's my availability:\n";
const DATE_COLUMN: &str = "Date        ";
const COLUMN_SEPARATOR: &str = " | ";

/// Format a date label such as `Wed, Mar 20`
pub fn format_date<Z>(dt: &DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    dt.format(DATE_LABEL_FORMAT).to_string()
}

/// Format a 12-hour time label such as `9:00 AM`
pub fn format_time<Z>(dt: &DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    dt.format(TIME_LABEL_FORMAT).to_string()
}

/// Format a `start - end` time range
pub fn format_range<Z>(start: &DateTime<Z>, end: &DateTime<Z>) -> String
where
    Z: TimeZone,
    Z::Offset: Display,
{
    format!("{} - {}", format_time(start), format_time(end))
}

/// Join the cells of one output row
pub fn format_row(cells: &[&str]) -> String {
    cells.join(COLUMN_SEPARATOR)
}

/// Column header naming the user's and, when present, the recipient's zone
pub fn format_header(user_tz: Tz, recipient_tz: Option<Tz>) -> String {
    let mut header = format!("{DATE_COLUMN}| My Timezone ({user_tz})");
    if let Some(recipient_tz) = recipient_tz {
        header.push_str(&format!(" | Recipient's Timezone ({recipient_tz})"));
    }
    header
}

/// Intro line, header and the separator rule underneath it
pub fn preamble(user_tz: Tz, recipient_tz: Option<Tz>) -> Vec<String> {
    let header = format_header(user_tz, recipient_tz);
    let rule = "-".repeat(header.chars().count());
    vec![INTRO_LINE.to_string(), header, rule]
}
