//! Core use-case services.
//!
//! # Responsibility
//! - Own the application aggregate and its persistence side effects.
//! - Provide backup and share entry points for the CLI layer.
//! - Keep callers decoupled from storage details.

pub mod backup;
pub mod share;
pub mod state_service;
