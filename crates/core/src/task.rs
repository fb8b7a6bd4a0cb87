//! Task model - the unit of scheduled work in a project.

use serde::{Deserialize, Serialize};

use crate::Date;

/// A scheduled piece of work assigned to one person.
///
/// `start_date` and `due_date` are optional so a loader can hand over
/// partially dated tasks; analysis skips a task for any metric whose
/// dates it lacks instead of failing the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier within the project
    pub id: String,

    /// Task title
    pub name: String,

    /// Person the task is assigned to
    pub assigned_to: Option<String>,

    /// Planned start
    pub start_date: Option<Date>,

    /// Planned finish
    pub due_date: Option<Date>,

    /// Actual finish, present once the work is done
    pub completion_date: Option<Date>,

    /// Most recent status touch
    pub last_updated_date: Date,

    /// Current status
    pub status: TaskStatus,
}

impl Task {
    /// Assignee name, or `None` when missing or blank.
    pub fn assignee(&self) -> Option<&str> {
        self.assigned_to
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Scheduled, no work yet
    NotStarted,
    /// Being worked on
    InProgress,
    /// Finished
    Completed,
    /// Paused
    OnHold,
    /// Dropped
    Cancelled,
}

impl TaskStatus {
    /// All statuses in declaration order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::OnHold,
        TaskStatus::Cancelled,
    ];

    /// Wire literal for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "NOT_STARTED",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::OnHold => "ON_HOLD",
            TaskStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether the work is finished.
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Whether the task is expected to move: not started or in progress.
    pub fn is_active(&self) -> bool {
        matches!(self, TaskStatus::NotStarted | TaskStatus::InProgress)
    }

    /// Whether the task has reached an end state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status literal is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status `{0}`")]
pub struct ParseStatusError(pub String);

impl std::str::FromStr for TaskStatus {
    type Err = ParseStatusError;

    /// Exact, case-sensitive match against the wire literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}
