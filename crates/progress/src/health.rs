//! Overdue and stagnant task detection.

use vitals_core::{Date, Project, Task};

use crate::error::{Metric, TaskField};
use crate::schedule::{days_between, require, Checked};

/// Incomplete tasks whose due date is strictly before `today`, in input order.
///
/// Tasks without a due date cannot be judged and are left out.
pub fn overdue_tasks(project: &Project, today: Date) -> Vec<&Task> {
    overdue_tasks_checked(project, today).into_value()
}

/// [`overdue_tasks`], also reporting the undated tasks that were left out.
pub fn overdue_tasks_checked(project: &Project, today: Date) -> Checked<Vec<&Task>> {
    let mut checked = Checked::new(Vec::new());

    for task in project.tasks.iter().filter(|t| !t.status.is_completed()) {
        match require(task, task.due_date, TaskField::DueDate, Metric::Overdue) {
            Ok(due) if due < today => checked.value.push(task),
            Ok(_) => {}
            Err(gap) => checked.skipped.push(gap),
        }
    }

    checked
}

/// Not-started or in-progress tasks untouched for more than `days_threshold` days.
///
/// Completed, on-hold and cancelled tasks are never stagnant.
pub fn stagnant_tasks(project: &Project, today: Date, days_threshold: u32) -> Vec<&Task> {
    project
        .tasks
        .iter()
        .filter(|t| t.status.is_active())
        .filter(|t| days_between(t.last_updated_date, today) > i64::from(days_threshold))
        .collect()
}
