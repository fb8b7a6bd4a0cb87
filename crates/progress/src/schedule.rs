//! Date and schedule helpers shared by the metrics.

use chrono::TimeDelta;
use vitals_core::{Date, Task};

use crate::error::{DataIntegrityError, Metric, TaskField};

/// A metric value together with the tasks that had to be left out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    /// Computed value
    pub value: T,
    /// Tasks skipped while computing it
    pub skipped: Vec<DataIntegrityError>,
}

impl<T> Checked<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            value,
            skipped: Vec::new(),
        }
    }

    /// Drop the skip list and keep the value.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: Date, to: Date) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// `date` shifted by `days`, or `None` outside chrono's range.
pub(crate) fn add_days(date: Date, days: i64) -> Option<Date> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// Unwrap an optional task field or report it as a gap for `metric`.
pub(crate) fn require<T>(
    task: &Task,
    value: Option<T>,
    field: TaskField,
    metric: Metric,
) -> Result<T, DataIntegrityError> {
    value.ok_or_else(|| DataIntegrityError::MissingField {
        task_id: task.id.clone(),
        field,
        metric,
    })
}

/// Planned start and due date of a task.
pub(crate) fn planned_span(task: &Task, metric: Metric) -> Result<(Date, Date), DataIntegrityError> {
    let start = require(task, task.start_date, TaskField::StartDate, metric)?;
    let due = require(task, task.due_date, TaskField::DueDate, metric)?;
    Ok((start, due))
}
