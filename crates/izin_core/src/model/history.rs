//! Generated letter history.
//!
//! # Invariants
//! - A history item is an immutable snapshot of rendered text.
//! - History is kept newest first.

use super::EntryId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Snapshot of one generated letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: EntryId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub category: String,
    pub text: String,
}

impl HistoryItem {
    /// Creates a history snapshot stamped with the current time.
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self::at(chrono::Utc::now().timestamp_millis(), category, text)
    }

    /// Creates a history snapshot with a caller-provided timestamp.
    pub fn at(created_at: i64, category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            category: category.into(),
            text: text.into(),
        }
    }
}
