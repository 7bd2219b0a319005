//! Mapping a checklist report onto check-run semantics

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::checklist::{ChecklistSyntax, Report, render, strip};

pub const SUMMARY_ALL_COMPLETED: &str = "All tasks are completed!";
pub const SUMMARY_SOME_PENDING: &str = "Some tasks are uncompleted!";
pub const NO_TASK_LIST: &str = "No task list";

/// Check-run conclusion values accepted by GitHub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
    TimedOut,
    ActionRequired,
}

impl fmt::Display for Conclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conclusion::Success => write!(f, "success"),
            Conclusion::Failure => write!(f, "failure"),
            Conclusion::Neutral => write!(f, "neutral"),
            Conclusion::Cancelled => write!(f, "cancelled"),
            Conclusion::TimedOut => write!(f, "timed_out"),
            Conclusion::ActionRequired => write!(f, "action_required"),
        }
    }
}

/// What gets reported for one pull request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub conclusion: Conclusion,
    pub summary: String,
    pub text: String,
}

impl CheckOutcome {
    /// Outcome for a pull request without a body
    pub fn no_task_list() -> Self {
        Self {
            conclusion: Conclusion::Success,
            summary: NO_TASK_LIST.to_string(),
            text: NO_TASK_LIST.to_string(),
        }
    }

    pub fn from_report(report: &Report) -> Self {
        let (conclusion, summary) = if report.all_completed() {
            (Conclusion::Success, SUMMARY_ALL_COMPLETED)
        } else {
            (Conclusion::Failure, SUMMARY_SOME_PENDING)
        };
        Self {
            conclusion,
            summary: summary.to_string(),
            text: report.text().to_string(),
        }
    }

    /// Evaluate an optional body; absent or blank bodies have no task list
    pub fn evaluate(body: Option<&str>, syntax: &ChecklistSyntax) -> Self {
        let body = match body {
            Some(body) if !body.trim().is_empty() => body,
            _ => {
                info!("no task list present, skipping");
                return Self::no_task_list();
            }
        };

        let stripped = strip(body, syntax);
        debug!("task list with ignored tasks removed:\n{}", stripped);

        let report = render(&stripped, syntax);
        debug!(
            "{} completed, {} pending:\n{}",
            report.completed().len(),
            report.pending().len(),
            report.text()
        );

        Self::from_report(&report)
    }

    pub fn is_success(&self) -> bool {
        self.conclusion == Conclusion::Success
    }
}
