//! Runtime configuration resolution.
//!
//! # Responsibility
//! - Resolve the data directory and log level from explicit values, the
//!   environment, or defaults, in that order.
//! - Derive the state database and log directory paths.
//!
//! # Invariants
//! - Blank explicit or environment values are treated as unset.
//! - The default data directory is per-user and survives reboots; the temp
//!   directory is used only when the platform reports no data directory.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "IZIN_DATA_DIR";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "IZIN_LOG_LEVEL";

const DEFAULT_DATA_DIR_NAME: &str = "izin";
const STATE_DB_FILE_NAME: &str = "izin_state.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub data_dir: PathBuf,
    pub log_level: String,
}

impl CoreConfig {
    /// Resolves configuration from explicit values, then the process
    /// environment, then defaults.
    pub fn resolve(data_dir: Option<PathBuf>, log_level: Option<String>) -> Self {
        Self::resolve_with(data_dir, log_level, |key| std::env::var(key).ok())
    }

    /// Same as [`CoreConfig::resolve`] with an injectable environment lookup.
    pub fn resolve_with(
        data_dir: Option<PathBuf>,
        log_level: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let data_dir = data_dir
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| non_blank(env(ENV_DATA_DIR)).map(PathBuf::from))
            .unwrap_or_else(default_data_dir);
        let log_level = non_blank(log_level)
            .or_else(|| non_blank(env(ENV_LOG_LEVEL)))
            .unwrap_or_else(|| default_log_level().to_string());

        Self {
            data_dir,
            log_level,
        }
    }

    /// Path of the SQLite file holding the state slot.
    pub fn state_db_path(&self) -> PathBuf {
        self.data_dir.join(STATE_DB_FILE_NAME)
    }

    /// Directory receiving rolling log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join(LOG_DIR_NAME)
    }
}

/// Returns `<local data dir>/izin`, or `<temp dir>/izin` as a last resort.
pub fn default_data_dir() -> PathBuf {
    data_dir_under(dirs::data_local_dir())
}

fn data_dir_under(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(std::env::temp_dir)
        .join(DEFAULT_DATA_DIR_NAME)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

#[cfg(test)]
mod tests {
    use super::{data_dir_under, default_data_dir, CoreConfig, ENV_DATA_DIR, ENV_LOG_LEVEL};
    use std::path::PathBuf;

    fn env_with(data_dir: &'static str, level: &'static str) -> impl Fn(&str) -> Option<String> {
        move |key| match key {
            ENV_DATA_DIR => Some(data_dir.to_string()),
            ENV_LOG_LEVEL => Some(level.to_string()),
            _ => None,
        }
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let config = CoreConfig::resolve_with(
            Some(PathBuf::from("/srv/izin")),
            Some("warn".to_string()),
            env_with("/env/izin", "trace"),
        );
        assert_eq!(config.data_dir, PathBuf::from("/srv/izin"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn environment_wins_over_defaults_and_blank_is_unset() {
        let config =
            CoreConfig::resolve_with(None, Some("  ".to_string()), env_with("/env/izin", "trace"));
        assert_eq!(config.data_dir, PathBuf::from("/env/izin"));
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn defaults_apply_without_input() {
        let config = CoreConfig::resolve_with(None, None, |_| None);
        assert_eq!(config.data_dir, default_data_dir());
        if let Some(local) = dirs::data_local_dir() {
            assert_eq!(config.data_dir, local.join("izin"));
        }
        assert_eq!(
            config.state_db_path(),
            config.data_dir.join("izin_state.sqlite3")
        );
        assert_eq!(config.log_dir(), config.data_dir.join("logs"));
    }

    #[test]
    fn data_dir_prefers_platform_dir_over_temp() {
        assert_eq!(
            data_dir_under(Some(PathBuf::from("/home/guru/.local/share"))),
            PathBuf::from("/home/guru/.local/share/izin")
        );
        assert_eq!(data_dir_under(None), std::env::temp_dir().join("izin"));
    }
}
