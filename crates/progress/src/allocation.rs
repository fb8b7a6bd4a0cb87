//! Resource over-allocation detection.

use std::collections::HashMap;

use tracing::debug;
use vitals_core::{Project, TaskStatus};

use crate::error::{DataIntegrityError, Metric, TaskField};
use crate::schedule::Checked;

/// Assignees holding more than `active_task_limit` in-progress tasks.
///
/// Maps assignee to their in-progress count. Iteration order is
/// unspecified; sort by key for display.
pub fn resource_overallocations(project: &Project, active_task_limit: u32) -> HashMap<String, usize> {
    resource_overallocations_checked(project, active_task_limit).into_value()
}

/// [`resource_overallocations`], also reporting in-progress tasks with no assignee.
///
/// Unassigned work is not attributed to anyone, so it never counts
/// toward a limit.
pub fn resource_overallocations_checked(
    project: &Project,
    active_task_limit: u32,
) -> Checked<HashMap<String, usize>> {
    let mut skipped = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for task in project.tasks.iter().filter(|t| t.status == TaskStatus::InProgress) {
        match task.assignee() {
            Some(name) => *counts.entry(name).or_insert(0) += 1,
            None => skipped.push(DataIntegrityError::MissingField {
                task_id: task.id.clone(),
                field: TaskField::AssignedTo,
                metric: Metric::Allocation,
            }),
        }
    }

    let limit = active_task_limit as usize;
    let value: HashMap<String, usize> = counts
        .into_iter()
        .filter(|(_, count)| *count > limit)
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    debug!(over_limit = value.len(), limit, "Resource allocation checked");

    Checked { value, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::{Date, Task};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn task(id: &str, assignee: Option<&str>, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            name: format!("Task {}", id),
            assigned_to: assignee.map(str::to_string),
            start_date: Some(date("2024-01-01")),
            due_date: Some(date("2024-01-10")),
            completion_date: None,
            last_updated_date: date("2024-01-01"),
            status,
        }
    }

    fn project(tasks: Vec<Task>) -> Project {
        Project {
            name: "Test".to_string(),
            client_name: "Client".to_string(),
            start_date: date("2024-01-01"),
            milestones: vec![],
            tasks,
        }
    }

    #[test]
    fn test_overallocation_is_strictly_above_limit() {
        let p = project(vec![
            task("1", Some("Ali"), TaskStatus::InProgress),
            task("2", Some("Ali"), TaskStatus::InProgress),
            task("3", Some("Ali"), TaskStatus::InProgress),
            task("4", Some("Bobby"), TaskStatus::InProgress),
            task("5", Some("Bobby"), TaskStatus::InProgress),
        ]);
        let result = resource_overallocations(&p, 2);
        assert_eq!(result.len(), 1);
        assert_eq!(result.get("Ali"), Some(&3));
        assert!(!result.contains_key("Bobby"));
    }

    #[test]
    fn test_only_in_progress_counts() {
        let p = project(vec![
            task("1", Some("Ali"), TaskStatus::InProgress),
            task("2", Some("Ali"), TaskStatus::NotStarted),
            task("3", Some("Ali"), TaskStatus::OnHold),
            task("4", Some("Ali"), TaskStatus::Completed),
        ]);
        assert!(resource_overallocations(&p, 0).get("Ali") == Some(&1));
        assert!(resource_overallocations(&p, 1).is_empty());
    }

    #[test]
    fn test_unassigned_tasks_are_skipped() {
        let p = project(vec![
            task("1", None, TaskStatus::InProgress),
            task("2", Some(" "), TaskStatus::InProgress),
            task("3", Some("Ali"), TaskStatus::InProgress),
        ]);
        let checked = resource_overallocations_checked(&p, 0);
        assert_eq!(checked.value.len(), 1);
        assert_eq!(checked.value.get("Ali"), Some(&1));
        let skipped: Vec<_> = checked.skipped.iter().map(|gap| gap.task_id()).collect();
        assert_eq!(skipped, ["1", "2"]);
    }

    #[test]
    fn test_empty_project_has_no_overallocation() {
        assert!(resource_overallocations(&project(vec![]), 2).is_empty());
    }
}
