use chrono::NaiveDate;
use izin_core::db::open_db_in_memory;
use izin_core::{
    decode_backup, Action, ApplicationState, Day, LetterForm, RepoError, RepoResult,
    ScheduleEntry, SqliteStateRepository, StateContainer, StateRepository, Template, Theme,
    UserProfile, CATEGORY_HALAQAH, CATEGORY_KBM, STATE_SLOT_KEY,
};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory slot store that can be switched into failure modes.
#[derive(Default)]
struct FlakyRepository {
    slots: RefCell<HashMap<String, String>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl StateRepository for FlakyRepository {
    fn load_slot(&self, key: &str) -> RepoResult<Option<String>> {
        if self.fail_reads {
            return Err(RepoError::Unavailable("read refused".to_string()));
        }
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn save_slot(&self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes {
            return Err(RepoError::Unavailable("quota exceeded".to_string()));
        }
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

#[test]
fn first_run_seeds_defaults() {
    let conn = open_db_in_memory().unwrap();
    let container = StateContainer::load(SqliteStateRepository::new(&conn));
    assert_eq!(container.state().templates.len(), 2);
    assert_eq!(
        container.state().categories,
        vec![CATEGORY_KBM.to_string(), CATEGORY_HALAQAH.to_string()]
    );
}

#[test]
fn every_mutation_is_persisted_and_reloaded() {
    let conn = open_db_in_memory().unwrap();
    let entry = ScheduleEntry::new(Day::Senin, "Aqidah", "X A", "MA", "07:00", "07:40");
    {
        let mut container = StateContainer::load(SqliteStateRepository::new(&conn));
        container
            .dispatch(Action::UpdateProfile(UserProfile {
                name: "Ustadz Ahmad".to_string(),
                ..UserProfile::default()
            }))
            .unwrap();
        container.dispatch(Action::AddSchedule(entry.clone())).unwrap();
        container.dispatch(Action::SetTheme(Theme::Dark)).unwrap();
    }

    let reloaded = StateContainer::load(SqliteStateRepository::new(&conn));
    assert_eq!(reloaded.state().profile.name, "Ustadz Ahmad");
    assert_eq!(reloaded.state().schedules, vec![entry]);
    assert_eq!(reloaded.state().theme, Theme::Dark);
}

#[test]
fn malformed_slot_falls_back_to_defaults() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::new(&conn);
    repo.save_slot(STATE_SLOT_KEY, "{ definitely not json").unwrap();

    let container = StateContainer::load(repo);
    let seeded = ApplicationState::seeded();
    let state = container.state();
    assert!(state.profile.is_blank());
    assert_eq!(state.categories, seeded.categories);
    assert_eq!(
        state
            .templates
            .iter()
            .map(|template| template.name.as_str())
            .collect::<Vec<_>>(),
        seeded
            .templates
            .iter()
            .map(|template| template.name.as_str())
            .collect::<Vec<_>>()
    );
}

#[test]
fn older_saved_shape_gains_new_profile_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::new(&conn);
    repo.save_slot(
        STATE_SLOT_KEY,
        r#"{"profile":{"name":"Ustadzah Aisyah","nip":"legacy"},"theme":"dark"}"#,
    )
    .unwrap();

    let container = StateContainer::load(repo);
    assert_eq!(container.state().profile.name, "Ustadzah Aisyah");
    assert_eq!(container.state().profile.additional_position, "");
    assert_eq!(container.state().theme, Theme::Dark);
    assert_eq!(container.state().templates.len(), 2);
}

#[test]
fn read_failure_falls_back_to_defaults() {
    let repo = FlakyRepository {
        fail_reads: true,
        ..FlakyRepository::default()
    };
    let container = StateContainer::load(repo);
    assert!(container.state().profile.is_blank());
    assert_eq!(container.state().templates.len(), 2);
}

#[test]
fn write_failure_is_ignored_and_state_still_updates() {
    let repo = FlakyRepository {
        fail_writes: true,
        ..FlakyRepository::default()
    };
    let mut container = StateContainer::load(repo);

    container.dispatch(Action::SetTheme(Theme::Dark)).unwrap();
    assert_eq!(container.state().theme, Theme::Dark);

    let repo = container.into_repo();
    assert!(repo.slots.borrow().is_empty());
}

#[test]
fn deleting_protected_category_leaves_set_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut container = StateContainer::load(SqliteStateRepository::new(&conn));
    container
        .dispatch(Action::AddCategory("Izin Sakit".to_string()))
        .unwrap();
    let before = container.state().categories.clone();

    container
        .dispatch(Action::DeleteCategory(CATEGORY_KBM.to_string()))
        .unwrap();
    container
        .dispatch(Action::DeleteCategory(CATEGORY_HALAQAH.to_string()))
        .unwrap();
    assert_eq!(container.state().categories, before);

    container
        .dispatch(Action::DeleteCategory("Izin Sakit".to_string()))
        .unwrap();
    assert_eq!(container.state().categories.len(), 2);
}

#[test]
fn rejected_action_does_not_touch_storage() {
    let repo = FlakyRepository::default();
    let mut container = StateContainer::load(repo);
    assert!(container
        .dispatch(Action::AddCategory(CATEGORY_KBM.to_string()))
        .is_err());

    let repo = container.into_repo();
    assert!(repo.slots.borrow().is_empty());
}

#[test]
fn generated_letter_can_be_saved_to_history() {
    let conn = open_db_in_memory().unwrap();
    let mut container = StateContainer::load(SqliteStateRepository::new(&conn));
    container
        .dispatch(Action::AddSchedule(ScheduleEntry::new(
            Day::Senin,
            "Aqidah",
            "X A",
            "MA",
            "07:00",
            "07:40",
        )))
        .unwrap();

    let form = LetterForm {
        category: CATEGORY_KBM.to_string(),
        reason: "sakit".to_string(),
        ..LetterForm::default()
    };
    let letter = container.generate_letter(&form, monday()).unwrap();
    assert!(letter
        .text
        .contains("- Aqidah X A (MA) 07.00 - 07.40 / 1 JP "));

    let first = container.save_history(CATEGORY_KBM, &letter.text).unwrap();
    let second = container.save_history(CATEGORY_KBM, "edited draft").unwrap();
    let history = &container.state().history;
    assert_eq!(history[0].id, second);
    assert_eq!(history[1].id, first);

    container.dispatch(Action::DeleteHistory(second)).unwrap();
    assert_eq!(container.state().history.len(), 1);
    container.dispatch(Action::ClearHistory).unwrap();
    assert!(container.state().history.is_empty());
}

#[test]
fn generating_after_deleting_every_template_fails_fast() {
    let conn = open_db_in_memory().unwrap();
    let mut container = StateContainer::load(SqliteStateRepository::new(&conn));
    let ids = container
        .state()
        .templates
        .iter()
        .map(|template| template.id)
        .collect::<Vec<_>>();
    for id in ids {
        container.dispatch(Action::DeleteTemplate(id)).unwrap();
    }

    assert!(container
        .generate_letter(&LetterForm::default(), monday())
        .is_err());
}

#[test]
fn export_then_import_reproduces_aggregate() {
    let conn = open_db_in_memory().unwrap();
    let mut container = StateContainer::load(SqliteStateRepository::new(&conn));
    container
        .dispatch(Action::AddTemplate(Template::new(
            "Izin Sakit",
            "{{nama}} sakit",
            Some("Izin Sakit".to_string()),
        )))
        .unwrap();
    container.save_history(CATEGORY_KBM, "isi surat").unwrap();
    let original = container.state().clone();

    let exported = container.export_backup().unwrap();
    assert_eq!(decode_backup(&exported).unwrap(), original);

    let other_conn = open_db_in_memory().unwrap();
    let mut other = StateContainer::load(SqliteStateRepository::new(&other_conn));
    other.import_backup(&exported).unwrap();
    assert_eq!(other.state(), &original);

    let reloaded = StateContainer::load(SqliteStateRepository::new(&other_conn));
    assert_eq!(reloaded.state(), &original);
}

#[test]
fn malformed_import_leaves_state_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut container = StateContainer::load(SqliteStateRepository::new(&conn));
    container.dispatch(Action::SetTheme(Theme::Dark)).unwrap();
    let before = container.state().clone();

    assert!(container.import_backup("[1, 2, 3]").is_err());
    assert!(container.import_backup("not json at all").is_err());
    assert_eq!(container.state(), &before);
}
