//! TaskCheck - pull request task-list checker
//!
//! Reads the markdown task list in a pull request body, drops anything inside
//! an ignore region, and reports whether every task is checked off as a
//! GitHub check run.
//!
//! # Architecture
//!
//! ```text
//! PR body ──> strip ──> render ──> Report ──> CheckOutcome ──> check run
//!            (ignore     (task
//!             regions)    items)
//! ```
//!
//! Everything under [`checklist`] is pure text analysis; [`github`] and
//! [`actions`] are the thin layer that talks to the Actions runner.
//!
//! # Example
//!
//! ```
//! use taskcheck::checklist::{ChecklistSyntax, analyze};
//!
//! let report = analyze("- [ ] buy milk\n- [x] walk dog", &ChecklistSyntax::default());
//! assert!(!report.all_completed());
//! assert_eq!(report.pending()[0].label, "buy milk");
//! ```

pub mod actions;
pub mod check;
pub mod checklist;
pub mod cli;
pub mod config;
pub mod github;

pub use check::{CheckOutcome, Conclusion};
pub use checklist::{ChecklistSyntax, Report, TaskItem, TaskState, analyze, render, strip};

/// Name of the check run created on the pull request head commit
pub const DEFAULT_CHECK_NAME: &str = "Tasks Completed Check";

/// Marker that opens an ignore region
pub const DEFAULT_IGNORE_START: &str = "<!-- ignore-task-list-start -->";

/// Marker that closes an ignore region
pub const DEFAULT_IGNORE_END: &str = "<!-- ignore-task-list-end -->";

/// Checkbox characters that mark a task as done
pub const DEFAULT_FILL_CHARS: &str = "xX";
