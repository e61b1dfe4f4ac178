//! Core domain logic for the surat izin (leave letter) generator.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod jp;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use config::CoreConfig;
pub use jp::{compute_teaching_periods, format_display_time, total_teaching_periods};
pub use logging::{default_log_level, init_logging, init_logging_from_config};
pub use model::category::{CategoryError, CATEGORY_HALAQAH, CATEGORY_KBM};
pub use model::history::HistoryItem;
pub use model::profile::UserProfile;
pub use model::schedule::{Day, ScheduleEntry};
pub use model::state::{ApplicationState, Layout, Theme};
pub use model::template::Template;
pub use model::EntryId;
pub use render::{
    render_letter, render_with_templates, LetterForm, RenderError, RenderedLetter,
    NO_SCHEDULE_SENTENCE,
};
pub use repo::state_repo::{
    RepoError, RepoResult, SqliteStateRepository, StateRepository, STATE_SLOT_KEY,
};
pub use service::backup::{decode_backup, export_file_name, export_json, ImportError};
pub use service::share::whatsapp_share_url;
pub use service::state_service::{merge_with_defaults, reduce, Action, StateContainer, StateError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
