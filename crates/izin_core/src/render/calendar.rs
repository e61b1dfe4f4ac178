//! Fixed Indonesian calendar names.

use crate::model::schedule::Day;
use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Resolves the weekday of `date` through the fixed seven-day table.
pub fn day_of(date: NaiveDate) -> Day {
    let index = date.weekday().num_days_from_sunday();
    // num_days_from_sunday is always 0..=6.
    Day::from_index(index).unwrap_or(Day::Ahad)
}

/// Formats `date` as `<Hari>, <d> <Bulan> <yyyy>`, e.g. `Senin, 20 Mei 2024`.
pub fn long_date(date: NaiveDate) -> String {
    let month = MONTH_NAMES[date.month0() as usize];
    format!("{}, {} {} {}", day_of(date), date.day(), month, date.year())
}
