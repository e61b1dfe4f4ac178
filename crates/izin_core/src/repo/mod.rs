//! Durable state slot persistence.
//!
//! # Responsibility
//! - Define the key/value slot contract used by the state container.
//! - Isolate SQLite query details from state orchestration.
//!
//! # Invariants
//! - A slot holds one opaque UTF-8 text value; parsing happens above.
//! - Writes overwrite the whole value (last write wins).

pub mod state_repo;
