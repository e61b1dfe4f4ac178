//! User profile record.
//!
//! # Invariants
//! - Every field is optional free text and defaults to the empty string.
//! - Missing fields in stored JSON decode as empty strings, so older saved
//!   shapes keep loading after new profile fields are introduced.

use serde::{Deserialize, Serialize};

/// Employee profile used to fill letter placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    /// Full name of the employee.
    pub name: String,
    /// Employee number (NIP/NIY).
    pub identifier: String,
    /// Organizational unit, e.g. `MA` or `Pondok Putra`.
    pub unit: String,
    pub employment_status: String,
    /// Primary job title.
    pub position: String,
    /// Secondary job title (wali kelas, musyrif, ...).
    pub additional_position: String,
    /// Free-text workload descriptor, e.g. `24 JP / pekan`.
    pub workload: String,
    /// Daily start time, `HH:MM`.
    pub start_time: String,
    /// Daily end time, `HH:MM`.
    pub end_time: String,
}

impl UserProfile {
    /// Returns whether no field has been filled in yet.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}
