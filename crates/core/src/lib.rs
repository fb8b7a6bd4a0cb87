//! Vitals core data models.
//!
//! This crate defines the project record that every other vitals crate
//! reads: the project itself, its milestones and its tasks. The records
//! carry no behavior beyond small classification helpers.

#![warn(missing_docs)]

mod project;
mod task;

pub use project::{Milestone, Project};
pub use task::{ParseStatusError, Task, TaskStatus};

/// Calendar date type used throughout the project record.
pub type Date = chrono::NaiveDate;
