//! Letter rendering.
//!
//! # Responsibility
//! - Resolve placeholder tokens from profile, schedule and form input.
//! - Pick the template for the requested category.
//!
//! # Invariants
//! - Rendering is pure: identical inputs produce byte-identical output.
//! - Rendered text is a working draft and is never re-parsed.

pub mod calendar;
pub mod letter;

pub use letter::{
    render_letter, render_with_templates, unresolved_placeholders, LetterForm, RenderError,
    RenderedLetter, NO_SCHEDULE_SENTENCE,
};
