//! Persisted application state container.
//!
//! # Responsibility
//! - Load the aggregate from the state slot, seeding defaults on first run.
//! - Apply mutations through a pure reducer, then persist the whole
//!   aggregate.
//! - Expose letter generation and backup use-cases over the current state.
//!
//! # Invariants
//! - A failed or malformed slot read never fails loading; seeded defaults
//!   are used instead.
//! - A failed slot write is logged and otherwise ignored.
//! - A rejected action leaves both memory and storage untouched.

use crate::model::category::{add_category, delete_category, CategoryError};
use crate::model::history::HistoryItem;
use crate::model::profile::UserProfile;
use crate::model::schedule::ScheduleEntry;
use crate::model::state::{ApplicationState, Layout, Theme};
use crate::model::template::Template;
use crate::model::EntryId;
use crate::render::{render_with_templates, LetterForm, RenderError, RenderedLetter};
use crate::repo::state_repo::{StateRepository, STATE_SLOT_KEY};
use crate::service::backup::{decode_backup, export_json, ImportError};
use chrono::NaiveDate;
use log::{info, warn};
use serde::de::Error as _;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROFILE_KEY: &str = "profile";

/// Mutation applied to the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    UpdateProfile(UserProfile),
    AddSchedule(ScheduleEntry),
    /// Replaces the entry with the same `id`.
    UpdateSchedule(ScheduleEntry),
    DeleteSchedule(EntryId),
    AddTemplate(Template),
    /// Replaces the template with the same `id`.
    UpdateTemplate(Template),
    DeleteTemplate(EntryId),
    AddCategory(String),
    /// No-op for protected or unknown names.
    DeleteCategory(String),
    /// Prepends a snapshot; history stays newest first.
    RecordHistory(HistoryItem),
    DeleteHistory(EntryId),
    ClearHistory,
    SetTheme(Theme),
    SetLayout(Layout),
    /// Wholesale replacement, used by backup import.
    Replace(Box<ApplicationState>),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Self::UpdateProfile(_) => "update_profile",
            Self::AddSchedule(_) => "add_schedule",
            Self::UpdateSchedule(_) => "update_schedule",
            Self::DeleteSchedule(_) => "delete_schedule",
            Self::AddTemplate(_) => "add_template",
            Self::UpdateTemplate(_) => "update_template",
            Self::DeleteTemplate(_) => "delete_template",
            Self::AddCategory(_) => "add_category",
            Self::DeleteCategory(_) => "delete_category",
            Self::RecordHistory(_) => "record_history",
            Self::DeleteHistory(_) => "delete_history",
            Self::ClearHistory => "clear_history",
            Self::SetTheme(_) => "set_theme",
            Self::SetLayout(_) => "set_layout",
            Self::Replace(_) => "replace",
        }
    }
}

/// Rejection reasons for state mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    Category(CategoryError),
    ScheduleNotFound(EntryId),
    TemplateNotFound(EntryId),
}

impl Display for StateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category(err) => write!(f, "{err}"),
            Self::ScheduleNotFound(id) => write!(f, "schedule entry not found: {id}"),
            Self::TemplateNotFound(id) => write!(f, "template not found: {id}"),
        }
    }
}

impl Error for StateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Category(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CategoryError> for StateError {
    fn from(value: CategoryError) -> Self {
        Self::Category(value)
    }
}

/// Computes the next aggregate for `action` without touching storage.
///
/// # Errors
/// - `StateError::Category` for blank or duplicate category names.
/// - `StateError::ScheduleNotFound` / `TemplateNotFound` for updates of
///   unknown entries.
pub fn reduce(state: &ApplicationState, action: Action) -> Result<ApplicationState, StateError> {
    let mut next = state.clone();
    match action {
        Action::UpdateProfile(profile) => next.profile = profile,
        Action::AddSchedule(entry) => next.schedules.push(entry),
        Action::UpdateSchedule(entry) => {
            let slot = next
                .schedules
                .iter_mut()
                .find(|existing| existing.id == entry.id)
                .ok_or(StateError::ScheduleNotFound(entry.id))?;
            *slot = entry;
        }
        Action::DeleteSchedule(id) => next.schedules.retain(|entry| entry.id != id),
        Action::AddTemplate(template) => next.templates.push(template),
        Action::UpdateTemplate(template) => {
            let slot = next
                .templates
                .iter_mut()
                .find(|existing| existing.id == template.id)
                .ok_or(StateError::TemplateNotFound(template.id))?;
            *slot = template;
        }
        Action::DeleteTemplate(id) => next.templates.retain(|template| template.id != id),
        Action::AddCategory(name) => add_category(&mut next.categories, &name)?,
        Action::DeleteCategory(name) => {
            delete_category(&mut next.categories, &name);
        }
        Action::RecordHistory(item) => next.history.insert(0, item),
        Action::DeleteHistory(id) => next.history.retain(|item| item.id != id),
        Action::ClearHistory => next.history.clear(),
        Action::SetTheme(theme) => next.theme = theme,
        Action::SetLayout(layout) => next.layout = layout,
        Action::Replace(state) => next = *state,
    }
    Ok(next)
}

/// Overlays a stored aggregate onto the seeded defaults.
///
/// Top-level keys present in `stored` replace the defaults; the `profile`
/// object is merged field by field so profile fields added later still get
/// their default. `null` values are ignored.
///
/// # Errors
/// - Returns a decode error when `stored` is not an object or the merged
///   shape does not decode.
pub fn merge_with_defaults(stored: &Value) -> Result<ApplicationState, serde_json::Error> {
    let Value::Object(stored_map) = stored else {
        return Err(serde_json::Error::custom(
            "stored state is not a JSON object",
        ));
    };

    let mut merged = match serde_json::to_value(ApplicationState::seeded())? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    for (key, value) in stored_map {
        if value.is_null() {
            continue;
        }
        if key == PROFILE_KEY {
            merge_object(&mut merged, PROFILE_KEY, value);
        } else {
            merged.insert(key.clone(), value.clone());
        }
    }

    serde_json::from_value(Value::Object(merged))
}

fn merge_object(target: &mut Map<String, Value>, key: &str, overlay: &Value) {
    let Value::Object(overlay_map) = overlay else {
        return;
    };
    let entry = target
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(base) = entry {
        for (field, value) in overlay_map {
            if !value.is_null() {
                base.insert(field.clone(), value.clone());
            }
        }
    }
}

/// Single owner of the application aggregate and its durable slot.
pub struct StateContainer<R: StateRepository> {
    repo: R,
    state: ApplicationState,
}

impl<R: StateRepository> StateContainer<R> {
    /// Loads the aggregate from `repo`, falling back to seeded defaults.
    ///
    /// # Side effects
    /// - Emits `state_load` events; never fails.
    pub fn load(repo: R) -> Self {
        let state = match repo.load_slot(STATE_SLOT_KEY) {
            Ok(Some(raw)) => match decode_stored(&raw) {
                Ok(state) => {
                    info!("event=state_load module=state status=ok source=slot");
                    state
                }
                Err(err) => {
                    warn!(
                        "event=state_load module=state status=fallback reason=decode_failed error={err}"
                    );
                    ApplicationState::seeded()
                }
            },
            Ok(None) => {
                info!("event=state_load module=state status=ok source=seed");
                ApplicationState::seeded()
            }
            Err(err) => {
                warn!(
                    "event=state_load module=state status=fallback reason=read_failed error={err}"
                );
                ApplicationState::seeded()
            }
        };

        Self { repo, state }
    }

    /// Returns the current aggregate.
    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    /// Applies `action`, then writes the full aggregate to storage.
    ///
    /// Storage write failures are logged and do not fail the call.
    pub fn dispatch(&mut self, action: Action) -> Result<&ApplicationState, StateError> {
        let action_name = action.name();
        let next = reduce(&self.state, action).map_err(|err| {
            info!("event=state_dispatch module=state status=rejected action={action_name} error={err}");
            err
        })?;
        self.state = next;
        self.persist(action_name);
        Ok(&self.state)
    }

    /// Renders a draft letter for `form` on `date` from the current state.
    ///
    /// # Errors
    /// - `RenderError::NoTemplates` when every template has been deleted.
    pub fn generate_letter(
        &self,
        form: &LetterForm,
        date: NaiveDate,
    ) -> Result<RenderedLetter, RenderError> {
        render_with_templates(
            &self.state.templates,
            &self.state.profile,
            &self.state.schedules,
            date,
            form,
        )
    }

    /// Stores a history snapshot of `text` and returns its ID.
    pub fn save_history(
        &mut self,
        category: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<EntryId, StateError> {
        let item = HistoryItem::new(category, text);
        let id = item.id;
        self.dispatch(Action::RecordHistory(item))?;
        Ok(id)
    }

    /// Serializes the current aggregate for a backup file.
    pub fn export_backup(&self) -> Result<String, serde_json::Error> {
        export_json(&self.state)
    }

    /// Decodes `text` and wholesale-replaces the aggregate.
    ///
    /// On error the current aggregate is left untouched.
    pub fn import_backup(&mut self, text: &str) -> Result<(), ImportError> {
        let imported = decode_backup(text).map_err(|err| {
            warn!("event=state_import module=state status=error error={err}");
            err
        })?;
        self.state = imported;
        self.persist("replace");
        info!("event=state_import module=state status=ok");
        Ok(())
    }

    /// Consumes the container and returns the repository.
    pub fn into_repo(self) -> R {
        self.repo
    }

    fn persist(&self, action_name: &str) {
        let serialized = match serde_json::to_string(&self.state) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(
                    "event=state_persist module=state status=error action={action_name} error_code=serialize_failed error={err}"
                );
                return;
            }
        };

        if let Err(err) = self.repo.save_slot(STATE_SLOT_KEY, &serialized) {
            warn!(
                "event=state_persist module=state status=error action={action_name} error_code=write_failed error={err}"
            );
        }
    }
}

fn decode_stored(raw: &str) -> Result<ApplicationState, serde_json::Error> {
    let value = serde_json::from_str::<Value>(raw)?;
    merge_with_defaults(&value)
}

#[cfg(test)]
mod tests {
    use super::{merge_with_defaults, reduce, Action, StateError};
    use crate::model::category::{CategoryError, CATEGORY_KBM};
    use crate::model::history::HistoryItem;
    use crate::model::schedule::{Day, ScheduleEntry};
    use crate::model::state::{ApplicationState, Theme};
    use serde_json::json;

    #[test]
    fn merge_fills_missing_profile_fields_from_defaults() {
        let stored = json!({
            "profile": { "name": "Ustadz Ahmad" },
            "theme": "dark"
        });

        let state = merge_with_defaults(&stored).unwrap();
        assert_eq!(state.profile.name, "Ustadz Ahmad");
        assert_eq!(state.profile.workload, "");
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.templates.len(), 2);
    }

    #[test]
    fn merge_keeps_stored_collections_verbatim() {
        let stored = json!({ "categories": ["Izin KBM"], "history": [] });
        let state = merge_with_defaults(&stored).unwrap();
        assert_eq!(state.categories, vec![CATEGORY_KBM.to_string()]);
    }

    #[test]
    fn merge_ignores_null_values() {
        let stored = json!({ "schedules": null, "profile": { "name": null } });
        let state = merge_with_defaults(&stored).unwrap();
        assert!(state.schedules.is_empty());
        assert_eq!(state.profile.name, "");
    }

    #[test]
    fn merge_rejects_non_object_and_bad_shapes() {
        assert!(merge_with_defaults(&json!([1, 2])).is_err());
        assert!(merge_with_defaults(&json!({ "theme": "neon" })).is_err());
    }

    #[test]
    fn record_history_prepends_newest_first() {
        let state = ApplicationState::seeded();
        let first = HistoryItem::at(1, CATEGORY_KBM, "first");
        let second = HistoryItem::at(2, CATEGORY_KBM, "second");

        let state = reduce(&state, Action::RecordHistory(first)).unwrap();
        let state = reduce(&state, Action::RecordHistory(second.clone())).unwrap();
        assert_eq!(state.history[0], second);
        assert_eq!(state.history.len(), 2);
    }

    #[test]
    fn update_unknown_schedule_is_rejected_without_mutation() {
        let state = ApplicationState::seeded();
        let entry = ScheduleEntry::new(Day::Rabu, "Nahwu", "VII", "MTs", "07:00", "08:20");
        let err = reduce(&state, Action::UpdateSchedule(entry.clone())).unwrap_err();
        assert_eq!(err, StateError::ScheduleNotFound(entry.id));
    }

    #[test]
    fn duplicate_category_maps_to_state_error() {
        let state = ApplicationState::seeded();
        let err = reduce(&state, Action::AddCategory(CATEGORY_KBM.to_string())).unwrap_err();
        assert_eq!(
            err,
            StateError::Category(CategoryError::Duplicate(CATEGORY_KBM.to_string()))
        );
    }

    #[test]
    fn reduce_does_not_mutate_input() {
        let state = ApplicationState::seeded();
        let next = reduce(&state, Action::SetTheme(Theme::Dark)).unwrap();
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(next.theme, Theme::Dark);
    }
}
