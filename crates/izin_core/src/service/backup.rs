//! Backup export and typed import decode.
//!
//! # Responsibility
//! - Serialize the full aggregate into a backup file body.
//! - Decode untrusted backup text into a typed aggregate or a structured
//!   error.
//!
//! # Invariants
//! - Every top-level aggregate key is required in an import file.
//! - Schedule days must be one of the seven fixed day names.
//! - An imported aggregate carries at least one template.

use crate::model::state::ApplicationState;
use chrono::NaiveDate;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const BACKUP_FILE_PREFIX: &str = "backup_izin_";

/// Import decode failures.
#[derive(Debug)]
pub enum ImportError {
    /// Input is not valid JSON.
    Syntax(serde_json::Error),
    /// JSON does not match the aggregate shape.
    Shape(serde_json::Error),
    /// Decoded aggregate has no template to render from.
    NoTemplates,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "backup file is not valid JSON: {err}"),
            Self::Shape(err) => write!(f, "backup file has an unexpected shape: {err}"),
            Self::NoTemplates => write!(f, "backup file contains no letter templates"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Syntax(err) | Self::Shape(err) => Some(err),
            Self::NoTemplates => None,
        }
    }
}

/// Returns the backup file name for `date`: `backup_izin_<YYYY-MM-DD>.json`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("{BACKUP_FILE_PREFIX}{}.json", date.format("%Y-%m-%d"))
}

/// Serializes the full aggregate as pretty-printed JSON.
pub fn export_json(state: &ApplicationState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state)
}

/// Decodes backup text into an aggregate.
///
/// # Errors
/// - `ImportError::Syntax` when `text` is not JSON.
/// - `ImportError::Shape` when a key is missing or has the wrong type.
/// - `ImportError::NoTemplates` when the template list is empty.
pub fn decode_backup(text: &str) -> Result<ApplicationState, ImportError> {
    let value = serde_json::from_str::<Value>(text).map_err(ImportError::Syntax)?;
    let state = serde_json::from_value::<ApplicationState>(value).map_err(ImportError::Shape)?;
    if state.templates.is_empty() {
        return Err(ImportError::NoTemplates);
    }
    Ok(state)
}
