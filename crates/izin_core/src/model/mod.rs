//! Domain model for the letter generator aggregate.
//!
//! # Responsibility
//! - Define the canonical records persisted inside the application state.
//! - Keep category rules next to the data they guard.
//!
//! # Invariants
//! - `ApplicationState` is the only root persisted to the state slot.
//! - Every list item is identified by a stable `EntryId`.
//! - The two default categories can never be removed.

pub mod category;
pub mod history;
pub mod profile;
pub mod schedule;
pub mod state;
pub mod template;

use uuid::Uuid;

/// Stable identifier for schedules, templates and history items.
pub type EntryId = Uuid;
