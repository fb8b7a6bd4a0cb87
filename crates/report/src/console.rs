//! Plain-text console summary.

use std::io::Write;

use vitals_core::{Date, Project};
use vitals_progress::HealthReport;

use crate::error::{RenderError, Result};

/// Human-readable summary of a health report.
pub struct ConsoleSummary<'a> {
    project: &'a Project,
    report: &'a HealthReport<'a>,
}

impl<'a> ConsoleSummary<'a> {
    /// Summarize `report` for `project`.
    pub fn new(project: &'a Project, report: &'a HealthReport<'a>) -> Self {
        Self { project, report }
    }

    /// Render the summary as text.
    pub fn render(&self) -> String {
        let report = self.report;
        let mut lines = Vec::new();

        lines.push("--- Health Analysis Results ---".to_string());
        if self.project.client_name.is_empty() {
            lines.push(format!("Project: {}", self.project.name));
        } else {
            lines.push(format!(
                "Project: {} ({})",
                self.project.name, self.project.client_name
            ));
        }
        lines.push(format!("As of: {}", report.today));

        lines.push(String::new());
        lines.push(format!("[!] Overdue Tasks ({}):", report.overdue.len()));
        for task in &report.overdue {
            lines.push(format!(
                "  - {}: {} (Due: {})",
                task.id,
                task.name,
                format_date(task.due_date)
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "[!] Stagnant Tasks (No update in >{} days) ({}):",
            report.config.stagnant_days_threshold,
            report.stagnant.len()
        ));
        for task in &report.stagnant {
            lines.push(format!(
                "  - {}: {} (Last Update: {})",
                task.id, task.name, task.last_updated_date
            ));
        }

        lines.push(String::new());
        lines.push(format!(
            "[*] Delay Estimation: On average, tasks take {:.2} times the planned duration.",
            report.delay_factor
        ));
        lines.push(format!(
            "[*] Projected Project Completion Date: {}",
            report.projected_completion
        ));

        lines.push(String::new());
        lines.push(format!(
            "[!] Resource Allocation Inefficiencies (>{} active tasks):",
            report.config.active_task_limit
        ));
        let overallocations = report.sorted_overallocations();
        if overallocations.is_empty() {
            lines.push("  - None detected.".to_string());
        }
        for (name, count) in overallocations {
            lines.push(format!("  - {} has {} tasks in progress.", name, count));
        }

        if !report.integrity_issues.is_empty() {
            lines.push(String::new());
            lines.push(format!("[?] Data Gaps ({}):", report.integrity_issues.len()));
            for issue in &report.integrity_issues {
                lines.push(format!("  - {}", issue));
            }
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Write the rendered summary to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(self.render().as_bytes())
            .and_then(|_| out.flush())
            .map_err(|source| RenderError::Write {
                artifact: "console summary".to_string(),
                source,
            })
    }
}

pub(crate) fn format_date(date: Option<Date>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "n/a".to_string())
}
