//! ASCII Gantt-style timeline.

use std::io::Write;

use vitals_core::{Date, Project, Task, TaskStatus};
use vitals_progress::days_between;

use crate::error::{RenderError, Result};

/// Default number of chart columns.
pub const DEFAULT_CHART_WIDTH: usize = 60;

/// Widest chart [`Timeline::new`] will draw.
pub const MAX_CHART_WIDTH: usize = 1000;

const EMPTY_CELL: char = '.';

/// Single-character marker for a task's bar.
pub fn status_glyph(status: TaskStatus) -> char {
    match status {
        TaskStatus::Completed => 'C',
        TaskStatus::InProgress => 'I',
        TaskStatus::NotStarted => 'N',
        TaskStatus::OnHold | TaskStatus::Cancelled => 'O',
    }
}

/// Horizontal bar chart of task schedules.
#[derive(Debug, Clone, Copy)]
pub struct Timeline {
    width: usize,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(DEFAULT_CHART_WIDTH)
    }
}

/// Visible chart window.
struct Window {
    start: Date,
    span_days: i64,
}

impl Timeline {
    /// Create a timeline `width` columns wide, clamped to `1..=MAX_CHART_WIDTH`.
    pub fn new(width: usize) -> Self {
        Self {
            width: width.clamp(1, MAX_CHART_WIDTH),
        }
    }

    /// Chart width in columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Render the chart for every task in `project`.
    pub fn render(&self, project: &Project) -> String {
        let mut lines = vec![
            format!("--- Gantt-style Visual Tracker for: {} ---", project.name),
            String::new(),
        ];

        if project.tasks.is_empty() {
            lines.push("No tasks to display.".to_string());
            return lines.join("\n") + "\n";
        }

        let window = match (project.earliest_task_start(), project.latest_task_due()) {
            (Some(start), Some(end)) => {
                lines.push(format!("Timeline: {} to {}", start, end));
                // Zero or inverted span would divide by zero; one day keeps scaling defined.
                let span_days = days_between(start, end).max(1);
                Some(Window { start, span_days })
            }
            _ => {
                lines.push("Timeline: no dated tasks".to_string());
                None
            }
        };
        lines.push(String::new());

        for task in &project.tasks {
            lines.push(self.row(task, window.as_ref()));
        }

        lines.push(String::new());
        lines.push(
            "Legend: C=Completed, I=In Progress, N=Not Started, O=On Hold/Cancelled".to_string(),
        );

        lines.join("\n") + "\n"
    }

    /// Write the rendered chart to `out`.
    pub fn write_to<W: Write>(&self, project: &Project, out: &mut W) -> Result<()> {
        out.write_all(self.render(project).as_bytes())
            .and_then(|_| out.flush())
            .map_err(|source| RenderError::Write {
                artifact: "timeline".to_string(),
                source,
            })
    }

    fn row(&self, task: &Task, window: Option<&Window>) -> String {
        let bar = match (window, task.start_date, task.due_date) {
            (Some(window), Some(start), Some(due)) => self.bar(window, start, due, status_glyph(task.status)),
            _ => return format!(
                "{:<8} | {} | {} (undated)",
                task.id,
                EMPTY_CELL.to_string().repeat(self.width),
                task.name
            ),
        };
        format!("{:<8} | {} | {}", task.id, bar, task.name)
    }

    fn bar(&self, window: &Window, start: Date, due: Date, glyph: char) -> String {
        let width = self.width as i64;
        let offset = self.scale(days_between(window.start, start), window.span_days);
        let length = self.scale(days_between(start, due), window.span_days).max(1);

        // Keep at least one column of every bar on the chart.
        let first = offset.clamp(0, width - 1);
        let last = (first + length).min(width);

        (0..width)
            .map(|column| if column >= first && column < last { glyph } else { EMPTY_CELL })
            .collect()
    }

    fn scale(&self, days: i64, span_days: i64) -> i64 {
        (days as f64 * self.width as f64 / span_days as f64).round() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_storage::parse_project;

    const SAMPLE: &str = include_str!("../../../projects/project_nexus.json");

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn task(id: &str, start: Option<&str>, due: Option<&str>, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            name: format!("Task {}", id),
            assigned_to: Some("Ali".to_string()),
            start_date: start.map(date),
            due_date: due.map(date),
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

    fn bar_of(line: &str) -> &str {
        line.split(" | ").nth(1).unwrap()
    }

    #[test]
    fn test_status_glyphs() {
        assert_eq!(status_glyph(TaskStatus::Completed), 'C');
        assert_eq!(status_glyph(TaskStatus::InProgress), 'I');
        assert_eq!(status_glyph(TaskStatus::NotStarted), 'N');
        assert_eq!(status_glyph(TaskStatus::OnHold), 'O');
        assert_eq!(status_glyph(TaskStatus::Cancelled), 'O');
    }

    #[test]
    fn test_sample_timeline_one_column_per_day() {
        // 2023-09-01..2023-10-31 is 60 days, so 60 columns map one per day.
        let project = parse_project(SAMPLE).unwrap();
        let text = Timeline::default().render(&project);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "--- Gantt-style Visual Tracker for: Project Nexus ---");
        assert_eq!(lines[2], "Timeline: 2023-09-01 to 2023-10-31");
        assert_eq!(
            lines[4],
            format!("NEX-01   | {}{} | Setup Initial Infrastructure", "C".repeat(9), ".".repeat(51))
        );
        // NEX-06: offset 44 days, 10 days long
        assert_eq!(
            bar_of(lines[9]),
            format!("{}{}{}", ".".repeat(44), "I".repeat(10), ".".repeat(6))
        );
        assert_eq!(
            *lines.last().unwrap(),
            "Legend: C=Completed, I=In Progress, N=Not Started, O=On Hold/Cancelled"
        );
    }

    #[test]
    fn test_bars_round_to_nearest_column() {
        // span 20 days over 10 columns: 3 days offset -> 1.5 -> 2, 5 days -> 2.5 -> 3
        let p = project(vec![
            task("A", Some("2024-01-01"), Some("2024-01-21"), TaskStatus::NotStarted),
            task("B", Some("2024-01-04"), Some("2024-01-09"), TaskStatus::InProgress),
        ]);
        let text = Timeline::new(10).render(&p);
        let row = text.lines().find(|l| l.starts_with("B ")).unwrap();
        assert_eq!(bar_of(row), "..III.....");
    }

    #[test]
    fn test_zero_length_task_gets_one_column() {
        let p = project(vec![
            task("A", Some("2024-01-01"), Some("2024-01-31"), TaskStatus::Completed),
            task("B", Some("2024-01-16"), Some("2024-01-16"), TaskStatus::OnHold),
        ]);
        let text = Timeline::new(30).render(&p);
        let row = text.lines().find(|l| l.starts_with("B ")).unwrap();
        assert_eq!(bar_of(row).matches('O').count(), 1);
    }

    #[test]
    fn test_zero_span_does_not_divide_by_zero() {
        let p = project(vec![task("A", Some("2024-01-01"), Some("2024-01-01"), TaskStatus::InProgress)]);
        let text = Timeline::new(5).render(&p);
        let row = text.lines().find(|l| l.starts_with("A ")).unwrap();
        assert_eq!(bar_of(row), "I....");
    }

    #[test]
    fn test_task_ending_at_window_edge_stays_visible() {
        let p = project(vec![
            task("A", Some("2024-01-01"), Some("2024-01-11"), TaskStatus::InProgress),
            task("B", Some("2024-01-11"), Some("2024-01-11"), TaskStatus::NotStarted),
        ]);
        let text = Timeline::new(10).render(&p);
        let row = text.lines().find(|l| l.starts_with("B ")).unwrap();
        assert_eq!(bar_of(row), ".........N");
    }

    #[test]
    fn test_undated_task_rendered_without_bar() {
        let p = project(vec![
            task("A", Some("2024-01-01"), Some("2024-01-11"), TaskStatus::InProgress),
            task("B", None, Some("2024-01-05"), TaskStatus::NotStarted),
        ]);
        let text = Timeline::new(10).render(&p);
        let row = text.lines().find(|l| l.starts_with("B ")).unwrap();
        assert_eq!(row, "B        | .......... | Task B (undated)");
    }

    #[test]
    fn test_empty_project() {
        let text = Timeline::default().render(&project(vec![]));
        assert!(text.ends_with("No tasks to display.\n"));
    }

    #[test]
    fn test_width_is_at_least_one() {
        assert_eq!(Timeline::new(0).width(), 1);
    }

    #[test]
    fn test_oversized_width_is_capped() {
        let project = parse_project(SAMPLE).unwrap();
        let timeline = Timeline::new(usize::MAX);
        assert_eq!(timeline.width(), MAX_CHART_WIDTH);

        let text = timeline.render(&project);
        let row = text.lines().find(|l| l.starts_with("NEX-01")).unwrap();
        assert_eq!(bar_of(row).chars().count(), MAX_CHART_WIDTH);
    }
}
