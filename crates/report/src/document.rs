//! Paginated client document layout.
//!
//! Layout is independent of the output format: it produces pages of
//! positioned text lines which [`crate::pdf`] then encodes. A
//! [`PageWriter`] owns the vertical cursor for one document and starts a
//! new page whenever the cursor runs past the bottom margin.

use vitals_core::Project;
use vitals_progress::HealthReport;

use crate::console::format_date;

/// Typeface variant for a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    /// Body text
    Regular,
    /// Headings
    Bold,
    /// Secondary details
    Italic,
}

/// One line of text at a fixed position, in PDF points from bottom-left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// Text content
    pub text: String,
    /// Typeface
    pub style: FontStyle,
    /// Font size in points
    pub size: i64,
    /// Left edge
    pub x: i64,
    /// Baseline
    pub y: i64,
}

/// One page of laid-out lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Lines top to bottom
    pub lines: Vec<TextLine>,
}

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    /// Page width
    pub width: i64,
    /// Page height
    pub height: i64,
    /// Left, right and bottom margin
    pub margin: i64,
    /// Baseline of the first line on a page
    pub top: i64,
}

impl Default for PageGeometry {
    /// US Letter.
    fn default() -> Self {
        Self {
            width: 612,
            height: 792,
            margin: 50,
            top: 750,
        }
    }
}

impl PageGeometry {
    /// Rough character budget per line for Helvetica at `size` points.
    fn max_chars(&self, size: i64) -> usize {
        let usable = (self.width - 2 * self.margin).max(1);
        // Helvetica averages a little over half an em per glyph.
        (usable * 2 / size.max(1)).max(10) as usize
    }
}

/// Cursor threaded through one document's layout pass.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    y: i64,
}

/// Lays out lines top to bottom, paginating as needed.
#[derive(Debug)]
pub struct PageWriter {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Page,
    cursor: Cursor,
}

impl PageWriter {
    /// Start an empty document.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            cursor: Cursor { y: geometry.top },
        }
    }

    /// Place one line of text, wrapping long text onto further lines.
    pub fn text(&mut self, text: &str, style: FontStyle, size: i64) {
        let max_chars = self.geometry.max_chars(size);
        for (i, piece) in wrap(text, max_chars).into_iter().enumerate() {
            let piece = if i == 0 { piece } else { format!("  {}", piece) };
            self.place(piece, style, size);
        }
    }

    /// Bulleted body line.
    pub fn bullet(&mut self, text: &str) {
        self.text(&format!("- {}", text), FontStyle::Regular, 10);
    }

    /// Vertical space before the next line.
    pub fn gap(&mut self, points: i64) {
        self.cursor.y -= points;
    }

    /// Finish the document and return its pages.
    pub fn finish(mut self) -> DocumentLayout {
        if !self.current.lines.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        DocumentLayout { pages: self.pages }
    }

    fn place(&mut self, text: String, style: FontStyle, size: i64) {
        if self.cursor.y < self.geometry.margin {
            self.break_page();
        }
        self.current.lines.push(TextLine {
            text,
            style,
            size,
            x: self.geometry.margin,
            y: self.cursor.y,
        });
        self.cursor.y -= size * 3 / 2;
    }

    fn break_page(&mut self) {
        let full = std::mem::take(&mut self.current);
        self.pages.push(full);
        self.cursor = Cursor { y: self.geometry.top };
    }
}

/// Laid-out client document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLayout {
    /// Pages in order
    pub pages: Vec<Page>,
}

impl DocumentLayout {
    /// Lay out the health summary for `project`.
    ///
    /// Sections: title block, key indicators, then overdue, stagnant and
    /// resource notes, each omitted when empty.
    pub fn build(project: &Project, report: &HealthReport<'_>) -> Self {
        Self::build_with(PageGeometry::default(), project, report)
    }

    /// [`DocumentLayout::build`] with explicit page geometry.
    pub fn build_with(geometry: PageGeometry, project: &Project, report: &HealthReport<'_>) -> Self {
        let mut writer = PageWriter::new(geometry);

        let title = if project.client_name.is_empty() {
            "Project Health Summary".to_string()
        } else {
            format!("{} - Project Health Summary", project.client_name)
        };
        writer.text(&title, FontStyle::Bold, 18);
        writer.text(&format!("Project: {}", project.name), FontStyle::Regular, 14);
        writer.text(&format!("Report Date: {}", report.today), FontStyle::Italic, 12);

        writer.gap(30);
        writer.text("Key Health Indicators", FontStyle::Bold, 14);
        writer.bullet(&format!(
            "Average Delay Factor: {:.2} (tasks are taking {:.0}% of planned time)",
            report.delay_factor,
            report.delay_factor * 100.0
        ));
        writer.bullet(&format!(
            "Projected Completion Date (based on past performance): {}",
            report.projected_completion
        ));

        if !report.overdue.is_empty() {
            writer.gap(20);
            writer.text("Overdue Tasks", FontStyle::Bold, 14);
            for task in &report.overdue {
                writer.bullet(&format!(
                    "{} ({}) - Due: {}, Assigned: {}",
                    task.id,
                    task.name,
                    format_date(task.due_date),
                    task.assignee().unwrap_or("unassigned")
                ));
            }
        }

        if !report.stagnant.is_empty() {
            writer.gap(20);
            writer.text(
                &format!(
                    "Stagnant Tasks (No update in >{} days)",
                    report.config.stagnant_days_threshold
                ),
                FontStyle::Bold,
                14,
            );
            for task in &report.stagnant {
                writer.bullet(&format!(
                    "{} ({}) - Last Update: {}, Status: {}",
                    task.id, task.name, task.last_updated_date, task.status
                ));
            }
        }

        let overallocations = report.sorted_overallocations();
        if !overallocations.is_empty() {
            writer.gap(20);
            writer.text("Resource Allocation Notes", FontStyle::Bold, 14);
            for (name, count) in overallocations {
                writer.bullet(&format!(
                    "Potential Over-allocation: {} is assigned to {} tasks currently in progress.",
                    name, count
                ));
            }
        }

        writer.finish()
    }

    /// Section headings in document order.
    pub fn headings(&self) -> Vec<&str> {
        self.lines()
            .filter(|line| line.style == FontStyle::Bold && line.size == 14)
            .map(|line| line.text.as_str())
            .collect()
    }

    /// Every line across all pages.
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.pages.iter().flat_map(|page| page.lines.iter())
    }
}

/// Greedy word wrap; words longer than `max_chars` are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();

        if current.is_empty() {
            current = word;
        } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
            current.push(' ');
            current.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut current, word));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
