//! Task item scanning and report rendering

use serde::Serialize;
use std::fmt;

use super::ChecklistSyntax;

const COMPLETED_HEADER: &str = "## :white_check_mark: Completed Tasks";
const PENDING_HEADER: &str = "## :x: Uncompleted Tasks";

/// Completion state of a task item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Completed,
    Pending,
}

impl TaskState {
    fn checkbox(self) -> &'static str {
        match self {
            TaskState::Completed => "[x]",
            TaskState::Pending => "[ ]",
        }
    }
}

/// A single checklist line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskItem {
    /// List bullet as written: `-` or `*`
    pub bullet: char,
    pub state: TaskState,
    /// Everything after the checkbox and its trailing space
    pub label: String,
}

impl TaskItem {
    pub fn is_completed(&self) -> bool {
        self.state == TaskState::Completed
    }
}

impl fmt::Display for TaskItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.bullet, self.state.checkbox(), self.label)
    }
}

/// Parse one line as a task item
///
/// Accepted shape, after optional indentation: bullet, one space, `[`, a
/// single checkbox character, `]`, one space, label (possibly empty). A space in the
/// box is pending; a fill character is completed; anything else is not a
/// task.
pub fn parse_line(line: &str, syntax: &ChecklistSyntax) -> Option<TaskItem> {
    let line = line.trim_start_matches([' ', '\t']);

    let mut chars = line.chars();
    let bullet = chars.next().filter(|c| matches!(*c, '-' | '*'))?;
    let rest = chars.as_str().strip_prefix(" [")?;

    let mut chars = rest.chars();
    let mark = chars.next()?;
    let label = chars.as_str().strip_prefix("] ")?;

    let state = if mark == ' ' {
        TaskState::Pending
    } else if syntax.is_fill(mark) {
        TaskState::Completed
    } else {
        return None;
    };

    Some(TaskItem {
        bullet,
        state,
        label: label.to_string(),
    })
}

/// Every task item in `text`, in document order
pub fn parse_tasks(text: &str, syntax: &ChecklistSyntax) -> Vec<TaskItem> {
    text.lines().filter_map(|line| parse_line(line, syntax)).collect()
}

/// Completed and pending task items plus their rendered summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    completed: Vec<TaskItem>,
    pending: Vec<TaskItem>,
    text: String,
}

impl Report {
    /// Group items by state, keeping document order within each group
    pub fn from_items(items: Vec<TaskItem>) -> Self {
        let (completed, pending): (Vec<_>, Vec<_>) = items.into_iter().partition(TaskItem::is_completed);
        let text = format_report(&completed, &pending);
        Self {
            completed,
            pending,
            text,
        }
    }

    pub fn completed(&self) -> &[TaskItem] {
        &self.completed
    }

    pub fn pending(&self) -> &[TaskItem] {
        &self.pending
    }

    /// True when no task is pending, including when there are no tasks at all
    pub fn all_completed(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty() && self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.completed.len() + self.pending.len()
    }

    /// Markdown body listing completed tasks, then pending ones
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn format_report(completed: &[TaskItem], pending: &[TaskItem]) -> String {
    let mut sections = Vec::new();

    for (header, items) in [(COMPLETED_HEADER, completed), (PENDING_HEADER, pending)] {
        if items.is_empty() {
            continue;
        }
        let mut section = String::from(header);
        for item in items {
            section.push('\n');
            section.push_str(&item.to_string());
        }
        sections.push(section);
    }

    sections.join("\n\n")
}

/// Scan `text` for task items and build the report
pub fn render(text: &str, syntax: &ChecklistSyntax) -> Report {
    Report::from_items(parse_tasks(text, syntax))
}
