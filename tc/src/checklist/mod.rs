//! Task-list analysis
//!
//! Pure functions over the pull request body. Nothing in here performs I/O or
//! reads ambient state; the markers and fill characters arrive through
//! [`ChecklistSyntax`].

mod render;
mod strip;

pub use render::{Report, TaskItem, TaskState, parse_line, parse_tasks, render};
pub use strip::strip;

use serde::{Deserialize, Serialize};

/// Markup conventions agreed with document authors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSyntax {
    /// Literal that opens an ignore region
    pub ignore_start: String,

    /// Literal that closes an ignore region
    pub ignore_end: String,

    /// Characters accepted inside `[ ]` as "done"
    pub fill_chars: String,
}

impl Default for ChecklistSyntax {
    fn default() -> Self {
        Self {
            ignore_start: crate::DEFAULT_IGNORE_START.to_string(),
            ignore_end: crate::DEFAULT_IGNORE_END.to_string(),
            fill_chars: crate::DEFAULT_FILL_CHARS.to_string(),
        }
    }
}

impl ChecklistSyntax {
    /// Syntax with custom ignore markers and the default fill characters
    pub fn with_markers(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            ignore_start: start.into(),
            ignore_end: end.into(),
            ..Default::default()
        }
    }

    pub(crate) fn is_fill(&self, c: char) -> bool {
        c != ' ' && self.fill_chars.contains(c)
    }
}

/// Strip ignore regions, then render what remains
pub fn analyze(text: &str, syntax: &ChecklistSyntax) -> Report {
    let stripped = strip(text, syntax);
    render(&stripped, syntax)
}
