//! Task record definition.

use serde::{Deserialize, Serialize};

/// Category assigned when the user leaves the category field blank.
pub const DEFAULT_CATEGORY: &str = "General";

/// A single to-do entry.
///
/// Tasks have no generated id; a task's position in the store sequence is
/// its only identity, and two tasks may be field-for-field identical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub completed: bool,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Task {
    /// Create a new, not-yet-completed task. A blank category falls back
    /// to [`DEFAULT_CATEGORY`].
    pub fn new(title: &str, description: &str, category: &str) -> Self {
        let category = if category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        };
        Task {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            completed: false,
        }
    }
}
