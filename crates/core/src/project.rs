//! Project model - the snapshot being analyzed.

use serde::{Deserialize, Serialize};

use crate::task::Task;
use crate::Date;

/// A project snapshot: metadata, milestones and tasks.
///
/// Built once by a loader and read-only for the rest of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project name
    pub name: String,

    /// Client the project is delivered for
    pub client_name: String,

    /// Project kickoff date
    pub start_date: Date,

    /// Milestones, in file order
    pub milestones: Vec<Milestone>,

    /// Tasks, in file order
    pub tasks: Vec<Task>,
}

/// A named checkpoint with a due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Milestone name
    pub name: String,

    /// When the milestone is due
    pub due_date: Date,
}

impl Project {
    /// Earliest task start date, ignoring tasks without one.
    pub fn earliest_task_start(&self) -> Option<Date> {
        self.tasks.iter().filter_map(|t| t.start_date).min()
    }

    /// Latest task due date, ignoring tasks without one.
    pub fn latest_task_due(&self) -> Option<Date> {
        self.tasks.iter().filter_map(|t| t.due_date).max()
    }
}
