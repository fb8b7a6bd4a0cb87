//! Health analyzer - runs every metric over one snapshot.

use std::collections::{BTreeMap, HashMap};

use serde::{Serialize, Serializer};
use tracing::{info, warn};
use vitals_core::{Date, Project, Task};

use crate::allocation::resource_overallocations_checked;
use crate::error::DataIntegrityError;
use crate::estimator::{average_delay_factor_checked, estimate_projected_completion_date_checked};
use crate::health::{overdue_tasks_checked, stagnant_tasks};

/// Tunable thresholds for the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Days without an update before an active task is stagnant
    pub stagnant_days_threshold: u32,
    /// In-progress tasks one person may hold before being over-allocated
    pub active_task_limit: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            stagnant_days_threshold: 7,
            active_task_limit: 2,
        }
    }
}

/// Runs the health metrics over a project.
#[derive(Debug, Clone, Default)]
pub struct HealthAnalyzer {
    config: AnalysisConfig,
}

impl HealthAnalyzer {
    /// Create an analyzer with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze `project` as of `today`.
    ///
    /// Tasks missing a field one metric needs are left out of that metric,
    /// logged, and listed in [`HealthReport::integrity_issues`].
    pub fn analyze<'a>(&self, project: &'a Project, today: Date) -> HealthReport<'a> {
        info!("Analyzing '{}' as of {}", project.name, today);

        let mut integrity_issues = Vec::new();

        let overdue = overdue_tasks_checked(project, today);
        integrity_issues.extend(overdue.skipped);

        let stagnant = stagnant_tasks(project, today, self.config.stagnant_days_threshold);

        let delay = average_delay_factor_checked(project);
        integrity_issues.extend(delay.skipped);

        let projection = estimate_projected_completion_date_checked(project, delay.value, today);
        integrity_issues.extend(projection.skipped);

        let allocation = resource_overallocations_checked(project, self.config.active_task_limit);
        integrity_issues.extend(allocation.skipped);

        for issue in &integrity_issues {
            warn!(task = issue.task_id(), "{}", issue);
        }

        info!(
            overdue = overdue.value.len(),
            stagnant = stagnant.len(),
            overallocated = allocation.value.len(),
            gaps = integrity_issues.len(),
            "Analysis complete: delay factor {:.2}, projected completion {}",
            delay.value,
            projection.value
        );

        HealthReport {
            today,
            config: self.config,
            overdue: overdue.value,
            stagnant,
            delay_factor: delay.value,
            projected_completion: projection.value,
            overallocations: allocation.value,
            integrity_issues,
        }
    }
}

/// Everything the renderers need, computed once.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport<'a> {
    /// Reference date the analysis ran against
    pub today: Date,
    /// Thresholds used
    pub config: AnalysisConfig,
    /// Overdue tasks, in project order
    #[serde(serialize_with = "task_ids")]
    pub overdue: Vec<&'a Task>,
    /// Stagnant tasks, in project order
    #[serde(serialize_with = "task_ids")]
    pub stagnant: Vec<&'a Task>,
    /// Average actual/planned duration ratio
    pub delay_factor: f64,
    /// Forecast finish of the last remaining task
    pub projected_completion: Date,
    /// Over-allocated assignees and their in-progress counts
    #[serde(serialize_with = "sorted_map")]
    pub overallocations: HashMap<String, usize>,
    /// Tasks left out of individual metrics
    pub integrity_issues: Vec<DataIntegrityError>,
}

impl HealthReport<'_> {
    /// Over-allocations ordered by assignee name.
    pub fn sorted_overallocations(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self
            .overallocations
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Whether any metric flagged a problem.
    pub fn has_findings(&self) -> bool {
        !self.overdue.is_empty() || !self.stagnant.is_empty() || !self.overallocations.is_empty()
    }
}

fn task_ids<S: Serializer>(tasks: &[&Task], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(tasks.iter().map(|t| t.id.as_str()))
}

fn sorted_map<S: Serializer>(map: &HashMap<String, usize>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(map.iter().collect::<BTreeMap<_, _>>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::TaskStatus;
    use vitals_storage::parse_project;

    const SAMPLE: &str = include_str!("../../../projects/project_nexus.json");

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn sample() -> Project {
        parse_project(SAMPLE).unwrap()
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.stagnant_days_threshold, 7);
        assert_eq!(config.active_task_limit, 2);
        assert_eq!(HealthAnalyzer::new().config(), &config);
    }

    #[test]
    fn test_sample_project_end_to_end() {
        let project = sample();
        let report = HealthAnalyzer::new().analyze(&project, date("2023-10-16"));

        assert_eq!(ids(&report.overdue), ["NEX-02"]);
        assert_eq!(ids(&report.stagnant), ["NEX-02"]);
        assert_eq!(report.sorted_overallocations(), vec![("Ali", 3)]);

        // NEX-01: planned 9 days, took 11
        assert!((report.delay_factor - 11.0 / 9.0).abs() < 1e-12);
        // NEX-03: 2023-09-15 + trunc(46 * 11/9) = + 56 days
        assert_eq!(report.projected_completion, date("2023-11-10"));

        assert!(report.integrity_issues.is_empty());
        assert!(report.has_findings());
    }

    #[test]
    fn test_analysis_leaves_project_untouched() {
        let project = sample();
        let before = project.clone();
        let _report = HealthAnalyzer::new().analyze(&project, date("2023-10-16"));
        assert_eq!(project, before);
        assert_eq!(project, sample());
    }

    #[test]
    fn test_config_thresholds_apply() {
        let project = sample();
        let analyzer = HealthAnalyzer::new().with_config(AnalysisConfig {
            stagnant_days_threshold: 2,
            active_task_limit: 3,
        });
        let report = analyzer.analyze(&project, date("2023-10-16"));

        assert_eq!(ids(&report.stagnant), ["NEX-02", "NEX-03", "NEX-04", "NEX-05"]);
        assert!(report.overallocations.is_empty());
    }

    #[test]
    fn test_integrity_issues_are_collected_per_metric() {
        let mut project = sample();
        project.tasks[1].due_date = None;
        project.tasks[2].assigned_to = None;
        project.tasks[0].completion_date = None;

        let report = HealthAnalyzer::new().analyze(&project, date("2023-10-16"));
        let gaps: Vec<_> = report
            .integrity_issues
            .iter()
            .map(|gap| (gap.task_id().to_string(), gap.metric()))
            .collect();

        use crate::Metric;
        assert_eq!(
            gaps,
            vec![
                ("NEX-02".to_string(), Metric::Overdue),
                ("NEX-01".to_string(), Metric::DelayFactor),
                ("NEX-02".to_string(), Metric::Projection),
                ("NEX-03".to_string(), Metric::Allocation),
            ]
        );
        // Other metrics still run.
        assert_eq!(ids(&report.stagnant), ["NEX-02"]);
        assert_eq!(report.delay_factor, 1.0);
        assert!(report.overdue.is_empty());
    }

    #[test]
    fn test_all_tasks_completed_projects_latest_due() {
        let mut project = sample();
        for task in &mut project.tasks {
            task.status = TaskStatus::Completed;
            task.completion_date = task.due_date;
        }
        let report = HealthAnalyzer::new().analyze(&project, date("2023-10-16"));
        assert_eq!(report.projected_completion, date("2023-10-31"));
        assert!(!report.has_findings());
    }

    #[test]
    fn test_report_serializes_ids_and_sorted_allocations() {
        let project = sample();
        let report = HealthAnalyzer::new().analyze(&project, date("2023-10-16"));
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["today"], "2023-10-16");
        assert_eq!(json["overdue"], serde_json::json!(["NEX-02"]));
        assert_eq!(json["overallocations"], serde_json::json!({"Ali": 3}));
        assert_eq!(json["projectedCompletion"], "2023-11-10");
        assert_eq!(json["config"]["stagnantDaysThreshold"], 7);
    }
}
