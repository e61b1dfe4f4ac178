//! Teaching-period (JP) arithmetic over `HH:MM` time strings.
//!
//! # Invariants
//! - One JP is exactly 40 minutes.
//! - Malformed input never errors; it counts as a zero duration.
//! - Durations are clamped at zero when the end precedes the start.

use crate::model::schedule::ScheduleEntry;

/// Length of one teaching period in minutes.
pub const MINUTES_PER_JP: i64 = 40;

/// Computes `round((end - start) / 40)` for two `HH:MM` strings.
///
/// Returns 0 when either value is malformed or when `end` is not after
/// `start`. Halves round up, so a 20-minute slot counts as one JP.
pub fn compute_teaching_periods(start: &str, end: &str) -> u32 {
    let (Some(start_minutes), Some(end_minutes)) = (parse_minutes(start), parse_minutes(end))
    else {
        return 0;
    };

    let diff = end_minutes - start_minutes;
    if diff <= 0 {
        return 0;
    }

    u32::try_from((diff + MINUTES_PER_JP / 2) / MINUTES_PER_JP).unwrap_or(u32::MAX)
}

/// Sums JP over a set of schedule entries.
pub fn total_teaching_periods<'a>(entries: impl IntoIterator<Item = &'a ScheduleEntry>) -> u32 {
    entries
        .into_iter()
        .map(|entry| compute_teaching_periods(&entry.start_time, &entry.end_time))
        .sum()
}

/// Formats `HH:MM` as `HH.MM`, the display convention used in letters.
pub fn format_display_time(time: &str) -> String {
    time.replace(':', ".")
}

fn parse_minutes(value: &str) -> Option<i64> {
    let (hours, minutes) = value.trim().split_once(':')?;
    let hours = hours.trim().parse::<u32>().ok()?;
    let minutes = minutes.trim().parse::<u32>().ok()?;
    Some(i64::from(hours) * 60 + i64::from(minutes))
}
