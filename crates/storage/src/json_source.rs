//! JSON file project source.
//!
//! Decoding happens in two steps: `serde_json` reads the document into
//! loosely typed raw records, then each field is validated into the core
//! model. The second step is what lets errors name the exact field path
//! (`tasks[2].dueDate`) instead of a byte offset.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tokio::fs;
use tracing::{debug, info};
use vitals_core::{Date, Milestone, Project, Task, TaskStatus};

use super::{DataFormatError, ProjectSource, Result, StorageError};

/// Project source backed by a JSON file on disk.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source for the given file. Nothing is read until `load`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ProjectSource for JsonFileSource {
    async fn load(&self) -> Result<Project> {
        debug!("Reading project file {}", self.path.display());
        let json = fs::read_to_string(&self.path)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })?;

        let project = parse_project(&json).map_err(|source| StorageError::Format {
            path: self.path.clone(),
            source,
        })?;

        info!(
            tasks = project.tasks.len(),
            milestones = project.milestones.len(),
            "Loaded project '{}'",
            project.name
        );
        Ok(project)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProject {
    name: Option<String>,
    client_name: Option<String>,
    start_date: Option<String>,
    milestones: Option<Vec<RawMilestone>>,
    tasks: Option<Vec<RawTask>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMilestone {
    name: Option<String>,
    due_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    id: Option<String>,
    name: Option<String>,
    assigned_to: Option<String>,
    start_date: Option<String>,
    due_date: Option<String>,
    completion_date: Option<String>,
    last_updated_date: Option<String>,
    status: Option<String>,
}

/// Parse and validate a project document.
///
/// Required: `name` (non-blank), `startDate`, and for each task `id`
/// (non-blank, unique), `lastUpdatedDate` and `status`; for each
/// milestone `dueDate`. Task `startDate`, `dueDate`, `assignedTo` and
/// `completionDate` may be null or absent.
pub fn parse_project(json: &str) -> std::result::Result<Project, DataFormatError> {
    let raw: RawProject = serde_json::from_str(json)?;

    let name = required_text(raw.name, "name")?;
    let start_date = required_date(raw.start_date, "startDate")?;

    let milestones = raw
        .milestones
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, m)| convert_milestone(m, &format!("milestones[{}]", i)))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    let mut tasks = Vec::new();
    for (i, raw_task) in raw.tasks.unwrap_or_default().into_iter().enumerate() {
        let prefix = format!("tasks[{}]", i);
        let task = convert_task(raw_task, &prefix)?;
        if !seen.insert(task.id.clone()) {
            return Err(DataFormatError::DuplicateTaskId {
                path: format!("{}.id", prefix),
                id: task.id,
            });
        }
        tasks.push(task);
    }

    Ok(Project {
        name,
        client_name: raw.client_name.unwrap_or_default(),
        start_date,
        milestones,
        tasks,
    })
}

fn convert_milestone(raw: RawMilestone, prefix: &str) -> std::result::Result<Milestone, DataFormatError> {
    Ok(Milestone {
        name: raw.name.unwrap_or_default(),
        due_date: required_date(raw.due_date, &format!("{}.dueDate", prefix))?,
    })
}

fn convert_task(raw: RawTask, prefix: &str) -> std::result::Result<Task, DataFormatError> {
    let field = |name: &str| format!("{}.{}", prefix, name);

    let status_path = field("status");
    let status = match raw.status {
        Some(value) => value
            .parse::<TaskStatus>()
            .map_err(|_| DataFormatError::UnknownStatus {
                path: status_path,
                value,
            })?,
        None => return Err(DataFormatError::MissingField { path: status_path }),
    };

    Ok(Task {
        id: required_text(raw.id, &field("id"))?,
        name: raw.name.unwrap_or_default(),
        assigned_to: raw.assigned_to,
        start_date: optional_date(raw.start_date, &field("startDate"))?,
        due_date: optional_date(raw.due_date, &field("dueDate"))?,
        completion_date: optional_date(raw.completion_date, &field("completionDate"))?,
        last_updated_date: required_date(raw.last_updated_date, &field("lastUpdatedDate"))?,
        status,
    })
}

fn required_text(value: Option<String>, path: &str) -> std::result::Result<String, DataFormatError> {
    match value {
        Some(text) if text.trim().is_empty() => Err(DataFormatError::EmptyField {
            path: path.to_string(),
        }),
        Some(text) => Ok(text),
        None => Err(DataFormatError::MissingField {
            path: path.to_string(),
        }),
    }
}

fn required_date(value: Option<String>, path: &str) -> std::result::Result<Date, DataFormatError> {
    optional_date(value, path)?.ok_or_else(|| DataFormatError::MissingField {
        path: path.to_string(),
    })
}

fn optional_date(value: Option<String>, path: &str) -> std::result::Result<Option<Date>, DataFormatError> {
    value.map(|text| parse_date(&text, path)).transpose()
}

/// Strict `YYYY-MM-DD`; chrono alone would also accept unpadded fields.
fn parse_date(text: &str, path: &str) -> std::result::Result<Date, DataFormatError> {
    let well_formed = text.len() == 10
        && text.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });

    well_formed
        .then(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok())
        .flatten()
        .ok_or_else(|| DataFormatError::InvalidDate {
            path: path.to_string(),
            value: text.to_string(),
        })
}
