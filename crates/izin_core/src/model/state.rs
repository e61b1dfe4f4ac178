//! Application aggregate root.
//!
//! # Responsibility
//! - Hold every persisted collection and preference in one serializable
//!   record.
//! - Provide the seeded first-run state.
//!
//! # Invariants
//! - A seeded state has two templates and the two protected categories.
//! - `history` is ordered newest first.

use super::category::default_categories;
use super::history::HistoryItem;
use super::profile::UserProfile;
use super::schedule::ScheduleEntry;
use super::template::{default_templates, Template};
use serde::{Deserialize, Serialize};

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Display-width preference for the letter editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Phone-sized single column.
    #[default]
    Compact,
    Wide,
}

/// Single persisted root of all user data.
///
/// Every top-level field is required when decoding an import file; the
/// stored slot goes through `merge_with_defaults` first, which fills gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationState {
    pub profile: UserProfile,
    pub schedules: Vec<ScheduleEntry>,
    pub templates: Vec<Template>,
    /// Newest first.
    pub history: Vec<HistoryItem>,
    pub categories: Vec<String>,
    pub theme: Theme,
    pub layout: Layout,
}

impl ApplicationState {
    /// Builds the first-run state with seeded templates and categories.
    pub fn seeded() -> Self {
        Self {
            profile: UserProfile::default(),
            schedules: Vec::new(),
            templates: default_templates(),
            history: Vec::new(),
            categories: default_categories(),
            theme: Theme::default(),
            layout: Layout::default(),
        }
    }
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::{ApplicationState, Layout, Theme};
    use crate::model::category::{is_protected, CATEGORY_KBM};

    #[test]
    fn seeded_state_has_defaults() {
        let state = ApplicationState::seeded();
        assert!(state.profile.is_blank());
        assert_eq!(state.templates.len(), 2);
        assert!(state.categories.iter().all(|name| is_protected(name)));
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.layout, Layout::Compact);
    }

    #[test]
    fn serialization_uses_snake_case_wire_fields() {
        let state = ApplicationState::seeded();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["theme"], "light");
        assert_eq!(json["layout"], "compact");
        assert_eq!(json["profile"]["employment_status"], "");
        assert_eq!(json["categories"][0], CATEGORY_KBM);
        assert_eq!(json["templates"][0]["category"], CATEGORY_KBM);
    }
}
