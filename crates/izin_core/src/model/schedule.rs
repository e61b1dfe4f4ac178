//! Weekly teaching schedule entries.
//!
//! # Invariants
//! - `day` is always one of the seven fixed day names.
//! - Start/end times are not validated; an end before the start yields a
//!   zero JP duration instead of an error.

use super::EntryId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Day of week using the institution's fixed Indonesian names.
///
/// Index 0 is `Ahad` (Sunday), matching days-from-Sunday numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Ahad,
    Senin,
    Selasa,
    Rabu,
    Kamis,
    Jumat,
    Sabtu,
}

impl Day {
    /// Fixed ordered table indexed by days-from-Sunday.
    pub const ALL: [Day; 7] = [
        Day::Ahad,
        Day::Senin,
        Day::Selasa,
        Day::Rabu,
        Day::Kamis,
        Day::Jumat,
        Day::Sabtu,
    ];

    /// Looks up a day by its days-from-Sunday index (`0..=6`).
    pub fn from_index(index: u32) -> Option<Day> {
        Self::ALL.get(index as usize).copied()
    }

    /// Display name used in letters and in stored JSON.
    pub fn name(self) -> &'static str {
        match self {
            Day::Ahad => "Ahad",
            Day::Senin => "Senin",
            Day::Selasa => "Selasa",
            Day::Rabu => "Rabu",
            Day::Kamis => "Kamis",
            Day::Jumat => "Jumat",
            Day::Sabtu => "Sabtu",
        }
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a day name is not one of the seven fixed names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDay(pub String);

impl Display for UnknownDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown day `{}`; expected Ahad|Senin|Selasa|Rabu|Kamis|Jumat|Sabtu",
            self.0
        )
    }
}

impl std::error::Error for UnknownDay {}

impl FromStr for Day {
    type Err = UnknownDay;

    /// Parses a day name case-insensitively (`senin`, `SENIN`, `Senin`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownDay(trimmed.to_string()))
    }
}

/// One weekly teaching slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: EntryId,
    pub day: Day,
    pub subject: String,
    pub class_name: String,
    /// School level, e.g. `MTs` or `MA`.
    pub level: String,
    /// Zero-padded `HH:MM`.
    pub start_time: String,
    /// Zero-padded `HH:MM`.
    pub end_time: String,
    #[serde(default)]
    pub note: String,
}

impl ScheduleEntry {
    /// Creates an entry with a generated stable ID and an empty note.
    pub fn new(
        day: Day,
        subject: impl Into<String>,
        class_name: impl Into<String>,
        level: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            day,
            subject: subject.into(),
            class_name: class_name.into(),
            level: level.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            note: String::new(),
        }
    }

    /// Builder-style helper to attach a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Returns entries scheduled on `day`, sorted ascending by start time.
///
/// Lexicographic comparison is enough because times are zero-padded `HH:MM`.
pub fn entries_for_day(entries: &[ScheduleEntry], day: Day) -> Vec<&ScheduleEntry> {
    let mut matching = entries
        .iter()
        .filter(|entry| entry.day == day)
        .collect::<Vec<_>>();
    matching.sort_by(|left, right| left.start_time.cmp(&right.start_time));
    matching
}

#[cfg(test)]
mod tests {
    use super::{entries_for_day, Day, ScheduleEntry};

    #[test]
    fn day_index_follows_days_from_sunday() {
        assert_eq!(Day::from_index(0), Some(Day::Ahad));
        assert_eq!(Day::from_index(1), Some(Day::Senin));
        assert_eq!(Day::from_index(6), Some(Day::Sabtu));
        assert_eq!(Day::from_index(7), None);
    }

    #[test]
    fn day_parses_case_insensitively() {
        assert_eq!("jumat".parse::<Day>().unwrap(), Day::Jumat);
        assert_eq!(" SENIN ".parse::<Day>().unwrap(), Day::Senin);
        assert!("Monday".parse::<Day>().is_err());
    }

    #[test]
    fn entries_for_day_filters_and_sorts_by_start() {
        let entries = vec![
            ScheduleEntry::new(Day::Senin, "Fiqih", "XI B", "MA", "09:20", "10:00"),
            ScheduleEntry::new(Day::Selasa, "Hadits", "X A", "MA", "07:00", "07:40"),
            ScheduleEntry::new(Day::Senin, "Aqidah", "X A", "MA", "07:00", "07:40"),
        ];

        let monday = entries_for_day(&entries, Day::Senin);
        let subjects = monday
            .iter()
            .map(|entry| entry.subject.as_str())
            .collect::<Vec<_>>();
        assert_eq!(subjects, vec!["Aqidah", "Fiqih"]);
    }
}
