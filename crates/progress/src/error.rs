//! Per-task data gaps found during analysis.

use serde::Serialize;

/// Metric a task was being evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Overdue detection
    Overdue,
    /// Average delay factor
    DelayFactor,
    /// Projected completion date
    Projection,
    /// Resource over-allocation
    Allocation,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Metric::Overdue => "overdue detection",
            Metric::DelayFactor => "delay factor",
            Metric::Projection => "completion projection",
            Metric::Allocation => "resource allocation",
        })
    }
}

/// Optional task field a metric may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskField {
    /// `startDate`
    StartDate,
    /// `dueDate`
    DueDate,
    /// `completionDate`
    CompletionDate,
    /// `assignedTo`
    AssignedTo,
}

impl std::fmt::Display for TaskField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TaskField::StartDate => "startDate",
            TaskField::DueDate => "dueDate",
            TaskField::CompletionDate => "completionDate",
            TaskField::AssignedTo => "assignedTo",
        })
    }
}

/// A task that could not take part in one metric.
///
/// Never fatal: the task is left out of that metric and every other
/// metric is computed as usual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DataIntegrityError {
    /// Field the metric needs is absent
    #[error("task `{task_id}` has no {field}; skipped for {metric}")]
    #[serde(rename_all = "camelCase")]
    MissingField {
        /// Offending task
        task_id: String,
        /// Absent field
        field: TaskField,
        /// Metric that needed it
        metric: Metric,
    },

    /// Date arithmetic left chrono's supported range
    #[error("task `{task_id}` projects outside the supported date range; skipped for {metric}")]
    #[serde(rename_all = "camelCase")]
    DateOutOfRange {
        /// Offending task
        task_id: String,
        /// Metric being computed
        metric: Metric,
    },
}

impl DataIntegrityError {
    /// Id of the skipped task.
    pub fn task_id(&self) -> &str {
        match self {
            DataIntegrityError::MissingField { task_id, .. }
            | DataIntegrityError::DateOutOfRange { task_id, .. } => task_id,
        }
    }

    /// Metric the task was skipped for.
    pub fn metric(&self) -> Metric {
        match self {
            DataIntegrityError::MissingField { metric, .. }
            | DataIntegrityError::DateOutOfRange { metric, .. } => *metric,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let err = DataIntegrityError::MissingField {
            task_id: "T-1".to_string(),
            field: TaskField::StartDate,
            metric: Metric::DelayFactor,
        };
        assert_eq!(
            err.to_string(),
            "task `T-1` has no startDate; skipped for delay factor"
        );
        assert_eq!(err.task_id(), "T-1");
        assert_eq!(err.metric(), Metric::DelayFactor);
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let err = DataIntegrityError::DateOutOfRange {
            task_id: "T-9".to_string(),
            metric: Metric::Projection,
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "dateOutOfRange");
        assert_eq!(json["taskId"], "T-9");
        assert_eq!(json["metric"], "projection");
    }
}
