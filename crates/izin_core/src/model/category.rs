//! Letter category (jenis izin) rules.
//!
//! # Invariants
//! - `CATEGORY_KBM` and `CATEGORY_HALAQAH` are always present and can never
//!   be deleted.
//! - Category names are unique under case-sensitive comparison.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default category for leave from classroom teaching.
pub const CATEGORY_KBM: &str = "Izin KBM";
/// Default category for leave from halaqah (Qur'an circle) duty.
pub const CATEGORY_HALAQAH: &str = "Izin Halaqah";

const PROTECTED_CATEGORIES: &[&str] = &[CATEGORY_KBM, CATEGORY_HALAQAH];

/// Rejection reasons for category mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// Name is empty after trimming.
    EmptyName,
    /// Name already exists (case-sensitive).
    Duplicate(String),
}

impl Display for CategoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "category name cannot be empty"),
            Self::Duplicate(name) => write!(f, "category already exists: `{name}`"),
        }
    }
}

impl Error for CategoryError {}

/// Returns the seeded category list.
pub fn default_categories() -> Vec<String> {
    PROTECTED_CATEGORIES
        .iter()
        .map(|name| (*name).to_string())
        .collect()
}

/// Returns whether `name` is one of the non-deletable defaults.
pub fn is_protected(name: &str) -> bool {
    PROTECTED_CATEGORIES.contains(&name)
}

/// Appends a trimmed category name, rejecting empties and duplicates.
pub fn add_category(categories: &mut Vec<String>, name: &str) -> Result<(), CategoryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CategoryError::EmptyName);
    }
    if categories.iter().any(|existing| existing == trimmed) {
        return Err(CategoryError::Duplicate(trimmed.to_string()));
    }
    categories.push(trimmed.to_string());
    Ok(())
}

/// Removes a category. Protected and unknown names are left untouched.
///
/// Returns whether the collection changed.
pub fn delete_category(categories: &mut Vec<String>, name: &str) -> bool {
    if is_protected(name) {
        return false;
    }
    let before = categories.len();
    categories.retain(|existing| existing != name);
    categories.len() != before
}
