//! Delay-factor learning and completion-date projection.
//!
//! The delay factor is the mean ratio of actual to planned duration over
//! finished work. The projection inflates each remaining task's planned
//! duration by that factor and takes the latest resulting finish date.

use tracing::{debug, warn};
use vitals_core::{Date, Project, Task};

use crate::error::{DataIntegrityError, Metric, TaskField};
use crate::schedule::{add_days, days_between, planned_span, require, Checked};

/// Factor meaning "tasks finish exactly on plan".
pub const NEUTRAL_DELAY_FACTOR: f64 = 1.0;

/// Mean of `actual / planned` duration over completed tasks.
///
/// Returns [`NEUTRAL_DELAY_FACTOR`] when no completed task has a completion
/// date and a positive planned duration.
pub fn average_delay_factor(project: &Project) -> f64 {
    average_delay_factor_checked(project).into_value()
}

/// [`average_delay_factor`], also reporting completed tasks that lacked dates.
pub fn average_delay_factor_checked(project: &Project) -> Checked<f64> {
    let mut checked = Checked::new(NEUTRAL_DELAY_FACTOR);
    let mut ratios = Vec::new();

    for task in project.tasks.iter().filter(|t| t.status.is_completed()) {
        match delay_ratio(task) {
            Ok(Some(ratio)) => ratios.push(ratio),
            Ok(None) => debug!("Task {} has no positive planned duration, not sampled", task.id),
            Err(gap) => checked.skipped.push(gap),
        }
    }

    if !ratios.is_empty() {
        checked.value = ratios.iter().sum::<f64>() / ratios.len() as f64;
    }
    debug!(samples = ratios.len(), "Average delay factor {:.3}", checked.value);

    checked
}

/// `Ok(None)` for a zero or negative plan, which has no meaningful ratio.
fn delay_ratio(task: &Task) -> Result<Option<f64>, DataIntegrityError> {
    let completed = require(
        task,
        task.completion_date,
        TaskField::CompletionDate,
        Metric::DelayFactor,
    )?;
    let (start, due) = planned_span(task, Metric::DelayFactor)?;

    let planned = days_between(start, due);
    if planned <= 0 {
        return Ok(None);
    }
    let actual = days_between(start, completed);

    Ok(Some(actual as f64 / planned as f64))
}

/// Latest forecast finish across incomplete tasks.
///
/// Each incomplete task finishes at `start + trunc(planned * delay_factor)`
/// days. With no incomplete task to forecast, falls back to the latest due
/// date of any task, then to `today`.
pub fn estimate_projected_completion_date(project: &Project, delay_factor: f64, today: Date) -> Date {
    estimate_projected_completion_date_checked(project, delay_factor, today).into_value()
}

/// [`estimate_projected_completion_date`], also reporting tasks that could not be forecast.
pub fn estimate_projected_completion_date_checked(
    project: &Project,
    delay_factor: f64,
    today: Date,
) -> Checked<Date> {
    let factor = if delay_factor.is_finite() {
        delay_factor
    } else {
        warn!("Delay factor {} is not finite, projecting with {}", delay_factor, NEUTRAL_DELAY_FACTOR);
        NEUTRAL_DELAY_FACTOR
    };

    let mut checked = Checked::new(today);
    let mut latest: Option<Date> = None;

    for task in project.tasks.iter().filter(|t| !t.status.is_completed()) {
        match projected_finish(task, factor) {
            Ok(finish) => latest = latest.max(Some(finish)),
            Err(gap) => checked.skipped.push(gap),
        }
    }

    checked.value = match latest {
        Some(finish) => finish,
        None => {
            debug!("No incomplete task to forecast, falling back to latest due date");
            project.latest_task_due().unwrap_or(today)
        }
    };

    checked
}

fn projected_finish(task: &Task, factor: f64) -> Result<Date, DataIntegrityError> {
    let (start, due) = planned_span(task, Metric::Projection)?;

    // `as` truncates toward zero and saturates at the i64 bounds.
    let scaled = (days_between(start, due) as f64 * factor) as i64;

    add_days(start, scaled).ok_or_else(|| DataIntegrityError::DateOutOfRange {
        task_id: task.id.clone(),
        metric: Metric::Projection,
    })
}
