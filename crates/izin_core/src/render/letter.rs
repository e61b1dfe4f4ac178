//! Placeholder substitution for letter templates.
//!
//! # Responsibility
//! - Map every known `{{token}}` to a resolved value.
//! - Build the day schedule listing for `{{jadwal_kbm}}`.
//!
//! # Invariants
//! - Unset values render as a bracketed label, never as an empty string.
//! - Substitution is one literal pass; values are not scanned again, so a
//!   reason containing `{{nama}}` stays verbatim.
//! - Unknown tokens are left untouched.
//! - Only the exact `{{name}}` form is a token; `{{ name }}` is plain text.
//! - Supplied values are inserted exactly as entered.

use super::calendar::{day_of, long_date};
use crate::jp::{compute_teaching_periods, format_display_time};
use crate::model::profile::UserProfile;
use crate::model::schedule::{entries_for_day, ScheduleEntry};
use crate::model::template::{select_template, Template};
use crate::model::EntryId;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Substituted for `{{jadwal_kbm}}` when the day has no entries.
pub const NO_SCHEDULE_SENTENCE: &str = "Tidak ada jadwal KBM yang tercatat pada hari ini.";

const TOKEN_SCHEDULE: &str = "jadwal_kbm";

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid placeholder regex"));

/// Free-text answers captured by the letter form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterForm {
    /// Selected category; drives template auto-selection.
    pub category: String,
    pub reason: String,
    /// Halaqah group left behind (halaqah letters only).
    pub halaqah_group: String,
    /// Colleague covering the halaqah (halaqah letters only).
    pub halaqah_substitute: String,
}

/// Renderer failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No template exists to render from.
    NoTemplates,
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTemplates => write!(f, "no letter template available to render"),
        }
    }
}

impl Error for RenderError {}

/// Draft produced from a selected template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLetter {
    pub template_id: EntryId,
    pub template_name: String,
    pub text: String,
}

/// Selects the template for `form.category` and renders it.
///
/// # Errors
/// - `RenderError::NoTemplates` when `templates` is empty.
pub fn render_with_templates(
    templates: &[Template],
    profile: &UserProfile,
    schedules: &[ScheduleEntry],
    date: NaiveDate,
    form: &LetterForm,
) -> Result<RenderedLetter, RenderError> {
    let template = select_template(templates, &form.category).ok_or(RenderError::NoTemplates)?;
    Ok(RenderedLetter {
        template_id: template.id,
        template_name: template.name.clone(),
        text: render_letter(&template.body, profile, schedules, date, form),
    })
}

/// Substitutes every known placeholder in `body`.
pub fn render_letter(
    body: &str,
    profile: &UserProfile,
    schedules: &[ScheduleEntry],
    date: NaiveDate,
    form: &LetterForm,
) -> String {
    let mut values = resolve_values(profile, date, form);
    if body_mentions(body, TOKEN_SCHEDULE) {
        values.insert(TOKEN_SCHEDULE, schedule_listing(schedules, date));
    }

    PLACEHOLDER_RE
        .replace_all(body, |caps: &Captures<'_>| {
            let token = caps.get(1).map_or("", |m| m.as_str());
            match values.get(token) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Lists placeholder tokens still present in `text`, in first-seen order.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    for caps in PLACEHOLDER_RE.captures_iter(text) {
        let token = caps[0].to_string();
        if !seen.contains(&token) {
            seen.push(token);
        }
    }
    seen
}

/// Renders the lines for the weekday of `date`, or the fallback sentence.
fn schedule_listing(schedules: &[ScheduleEntry], date: NaiveDate) -> String {
    let entries = entries_for_day(schedules, day_of(date));
    if entries.is_empty() {
        return NO_SCHEDULE_SENTENCE.to_string();
    }

    entries
        .into_iter()
        .map(schedule_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn schedule_line(entry: &ScheduleEntry) -> String {
    let note = if entry.note.trim().is_empty() {
        String::new()
    } else {
        format!("({})", entry.note.trim())
    };
    format!(
        "- {} {} ({}) {} - {} / {} JP {}",
        entry.subject,
        entry.class_name,
        entry.level,
        format_display_time(&entry.start_time),
        format_display_time(&entry.end_time),
        compute_teaching_periods(&entry.start_time, &entry.end_time),
        note
    )
}

fn resolve_values(
    profile: &UserProfile,
    date: NaiveDate,
    form: &LetterForm,
) -> HashMap<&'static str, String> {
    let mut values = HashMap::new();
    values.insert("nama", or_label(&profile.name, "[Nama Pegawai]"));
    values.insert("nip", or_label(&profile.identifier, "[NIP]"));
    values.insert("unit", or_label(&profile.unit, "[Unit Kerja]"));
    values.insert(
        "status",
        or_label(&profile.employment_status, "[Status Kepegawaian]"),
    );
    values.insert("jabatan", or_label(&profile.position, "[Jabatan]"));
    values.insert(
        "jabatan_tambahan",
        or_label(&profile.additional_position, "[Jabatan Tambahan]"),
    );
    values.insert("beban_kerja", or_label(&profile.workload, "[Beban Kerja]"));
    values.insert(
        "jam_masuk",
        or_label(&format_display_time(&profile.start_time), "[Jam Masuk]"),
    );
    values.insert(
        "jam_pulang",
        or_label(&format_display_time(&profile.end_time), "[Jam Pulang]"),
    );
    values.insert("alasan", or_label(&form.reason, "[Alasan]"));
    values.insert("jenis_izin", or_label(&form.category, "[Jenis Izin]"));
    values.insert(
        "halaqah_kelompok",
        or_label(&form.halaqah_group, "[Kelompok Halaqah]"),
    );
    values.insert(
        "halaqah_pengganti",
        or_label(&form.halaqah_substitute, "[Pengganti]"),
    );
    values.insert("hari", day_of(date).name().to_string());
    values.insert("tanggal", long_date(date));
    values
}

fn body_mentions(body: &str, token: &str) -> bool {
    PLACEHOLDER_RE
        .captures_iter(body)
        .any(|caps| caps.get(1).is_some_and(|m| m.as_str() == token))
}

fn or_label(value: &str, label: &str) -> String {
    if value.trim().is_empty() {
        label.to_string()
    } else {
        value.to_string()
    }
}
