//! Text layouts for a list of availability slots.
//!
//! Both layouts start with the same intro line, header and rule. Slots are
//! never merged or deduplicated, even when they overlap.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::core::{
    format::{format_date, format_range, format_row, format_time, preamble},
    models::{Granularity, ZonedSlot},
    normalize::convert,
};

/// One `start - end` row per slot, grouped by the calendar date of the start.
///
/// Dates are emitted in ascending order; slots sharing a date keep input order.
pub fn render_continuous(slots: &[ZonedSlot], user_tz: Tz, recipient_tz: Option<Tz>) -> String {
    let mut output = preamble(user_tz, recipient_tz);

    let mut slots_by_date: BTreeMap<NaiveDate, Vec<ZonedSlot>> = BTreeMap::new();
    for slot in slots {
        let slot = slot.in_timezone(user_tz);
        slots_by_date
            .entry(slot.start.date_naive())
            .or_default()
            .push(slot);
    }

    for slot in slots_by_date.values().flatten() {
        let date = format_date(&slot.start);
        let range = format_range(&slot.start, &slot.end);

        let line = match recipient_tz {
            Some(recipient_tz) => {
                let recipient = slot.in_timezone(recipient_tz);
                let recipient_range = format_range(&recipient.start, &recipient.end);
                format_row(&[date.as_str(), range.as_str(), recipient_range.as_str()])
            }
            None => format_row(&[date.as_str(), range.as_str()]),
        };
        output.push(line);
    }

    output.join("\n")
}

/// One row per `granularity`-sized chunk of each slot.
///
/// A chunk is emitted for every cursor position strictly before the slot end,
/// so the last chunk may run past the end of the slot.
pub fn render_chunks(
    slots: &[ZonedSlot],
    user_tz: Tz,
    recipient_tz: Option<Tz>,
    granularity: Granularity,
) -> String {
    let mut output = preamble(user_tz, recipient_tz);
    let step = granularity.as_duration();

    for slot in slots {
        let slot = slot.in_timezone(user_tz);
        let mut cursor = slot.start;

        while cursor < slot.end {
            output.push(chunk_line(&cursor, recipient_tz));

            match cursor.checked_add_signed(step) {
                Some(next) => cursor = next,
                None => break,
            }
        }
    }

    output.join("\n")
}

fn chunk_line(cursor: &DateTime<Tz>, recipient_tz: Option<Tz>) -> String {
    let date = format_date(cursor);
    let time = format_time(cursor);

    match recipient_tz {
        Some(recipient_tz) => {
            let recipient_time = format_time(&convert(cursor, recipient_tz));
            format_row(&[date.as_str(), time.as_str(), recipient_time.as_str()])
        }
        None => format_row(&[date.as_str(), time.as_str()]),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::{Los_Angeles, New_York};
    use chrono_tz::Asia::Tokyo;

    use super::*;
    use crate::core::format::INTRO_LINE;

    fn ny_slot(day: u32, start: (u32, u32), end: (u32, u32)) -> ZonedSlot {
        ZonedSlot::new(
            New_York
                .with_ymd_and_hms(2024, 3, day, start.0, start.1, 0)
                .unwrap(),
            New_York
                .with_ymd_and_hms(2024, 3, day, end.0, end.1, 0)
                .unwrap(),
        )
    }

    /// Rows after the intro line, header and rule
    fn data_rows(output: &str) -> Vec<&str> {
        output.lines().skip(4).collect()
    }

    fn minutes(value: u32) -> Granularity {
        Granularity::new(value).unwrap()
    }

    #[test]
    fn test_continuous_single_slot() {
        let output = render_continuous(&[ny_slot(20, (9, 0), (11, 0))], New_York, None);

        assert_eq!(data_rows(&output), vec!["Wed, Mar 20 | 9:00 AM - 11:00 AM"]);
    }

    #[test]
    fn test_continuous_with_recipient() {
        let output = render_continuous(
            &[ny_slot(20, (9, 0), (11, 0))],
            New_York,
            Some(Los_Angeles),
        );

        let rule = "-".repeat(89);
        let expected = [
            INTRO_LINE,
            "Date        | My Timezone (America/New_York) | Recipient's Timezone (America/Los_Angeles)",
            rule.as_str(),
            "Wed, Mar 20 | 9:00 AM - 11:00 AM | 6:00 AM - 8:00 AM",
        ]
        .join("\n");
        assert_eq!(output, expected);
    }

    #[test]
    fn test_continuous_empty_slots() {
        let output = render_continuous(&[], New_York, None);

        assert!(output.starts_with("Here's my availability:\n\nDate"));
        assert_eq!(output.lines().count(), 4);
        assert!(data_rows(&output).is_empty());
    }

    #[test]
    fn test_continuous_orders_by_date() {
        let slots = [
            ny_slot(22, (9, 0), (10, 0)),
            ny_slot(20, (14, 0), (15, 0)),
            ny_slot(21, (9, 0), (10, 0)),
            ny_slot(20, (8, 0), (9, 0)),
        ];
        let output = render_continuous(&slots, New_York, None);

        assert_eq!(
            data_rows(&output),
            vec![
                "Wed, Mar 20 | 2:00 PM - 3:00 PM",
                "Wed, Mar 20 | 8:00 AM - 9:00 AM",
                "Thu, Mar 21 | 9:00 AM - 10:00 AM",
                "Fri, Mar 22 | 9:00 AM - 10:00 AM",
            ]
        );
    }

    #[test]
    fn test_continuous_keeps_duplicates() {
        let slot = ny_slot(20, (9, 0), (10, 0));
        let output = render_continuous(&[slot, slot], New_York, None);
        assert_eq!(data_rows(&output).len(), 2);
    }

    #[test]
    fn test_continuous_groups_by_user_date() {
        // 9:00 AM Tokyo on the 21st is still the 20th in New York
        let slot = ZonedSlot::new(
            Tokyo.with_ymd_and_hms(2024, 3, 21, 9, 0, 0).unwrap(),
            Tokyo.with_ymd_and_hms(2024, 3, 21, 10, 0, 0).unwrap(),
        );
        let output = render_continuous(&[slot], New_York, None);

        assert_eq!(data_rows(&output), vec!["Wed, Mar 20 | 8:00 PM - 9:00 PM"]);
    }

    #[test]
    fn test_continuous_degenerate_slot_does_not_panic() {
        let output = render_continuous(&[ny_slot(20, (11, 0), (9, 0))], New_York, None);
        assert_eq!(data_rows(&output), vec!["Wed, Mar 20 | 11:00 AM - 9:00 AM"]);
    }

    #[test]
    fn test_chunks_exact_multiple() {
        let output = render_chunks(&[ny_slot(20, (9, 0), (11, 0))], New_York, None, minutes(30));

        assert_eq!(
            data_rows(&output),
            vec![
                "Wed, Mar 20 | 9:00 AM",
                "Wed, Mar 20 | 9:30 AM",
                "Wed, Mar 20 | 10:00 AM",
                "Wed, Mar 20 | 10:30 AM",
            ]
        );
    }

    #[test]
    fn test_chunks_last_chunk_overruns_end() {
        let output = render_chunks(&[ny_slot(20, (9, 0), (10, 15))], New_York, None, minutes(30));

        assert_eq!(
            data_rows(&output),
            vec![
                "Wed, Mar 20 | 9:00 AM",
                "Wed, Mar 20 | 9:30 AM",
                "Wed, Mar 20 | 10:00 AM",
            ]
        );
    }

    #[test]
    fn test_chunks_granularity_larger_than_slot() {
        let output = render_chunks(&[ny_slot(20, (9, 0), (9, 45))], New_York, None, minutes(120));
        assert_eq!(data_rows(&output), vec!["Wed, Mar 20 | 9:00 AM"]);
    }

    #[test]
    fn test_chunks_zero_length_slot() {
        let output = render_chunks(&[ny_slot(20, (9, 0), (9, 0))], New_York, None, minutes(30));
        assert!(data_rows(&output).is_empty());
    }

    #[test]
    fn test_chunks_with_recipient() {
        let output = render_chunks(
            &[ny_slot(20, (9, 0), (10, 0))],
            New_York,
            Some(Los_Angeles),
            minutes(30),
        );

        assert_eq!(
            data_rows(&output),
            vec![
                "Wed, Mar 20 | 9:00 AM | 6:00 AM",
                "Wed, Mar 20 | 9:30 AM | 6:30 AM",
            ]
        );
    }

    #[test]
    fn test_chunks_do_not_merge_overlaps() {
        let slots = [ny_slot(20, (9, 0), (10, 0)), ny_slot(20, (9, 30), (10, 0))];
        let output = render_chunks(&slots, New_York, None, minutes(30));

        assert_eq!(
            data_rows(&output),
            vec![
                "Wed, Mar 20 | 9:00 AM",
                "Wed, Mar 20 | 9:30 AM",
                "Wed, Mar 20 | 9:30 AM",
            ]
        );
    }

    #[test]
    fn test_chunks_cross_midnight() {
        let slot = ZonedSlot::new(
            New_York.with_ymd_and_hms(2024, 3, 20, 23, 0, 0).unwrap(),
            New_York.with_ymd_and_hms(2024, 3, 21, 1, 0, 0).unwrap(),
        );
        let output = render_chunks(&[slot], New_York, None, minutes(60));

        assert_eq!(
            data_rows(&output),
            vec!["Wed, Mar 20 | 11:00 PM", "Thu, Mar 21 | 12:00 AM"]
        );
    }

    #[test]
    fn test_chunks_across_dst_gap() {
        // New York skips 2:00-3:00 AM on 2024-03-10
        let slot = ZonedSlot::new(
            New_York.with_ymd_and_hms(2024, 3, 10, 1, 0, 0).unwrap(),
            New_York.with_ymd_and_hms(2024, 3, 10, 4, 0, 0).unwrap(),
        );
        let output = render_chunks(&[slot], New_York, None, minutes(30));

        assert_eq!(
            data_rows(&output),
            vec![
                "Sun, Mar 10 | 1:00 AM",
                "Sun, Mar 10 | 1:30 AM",
                "Sun, Mar 10 | 3:00 AM",
                "Sun, Mar 10 | 3:30 AM",
            ]
        );
    }

    #[test]
    fn test_chunks_keep_input_order() {
        let slots = [ny_slot(21, (9, 0), (9, 30)), ny_slot(20, (9, 0), (9, 30))];
        let output = render_chunks(&slots, New_York, None, minutes(30));

        assert_eq!(
            data_rows(&output),
            vec!["Thu, Mar 21 | 9:00 AM", "Wed, Mar 20 | 9:00 AM"]
        );
    }
}
