//! Project source abstraction.

use async_trait::async_trait;
use std::path::PathBuf;
use vitals_core::Project;

/// Result type for source operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors produced while turning input bytes into a project record.
///
/// Every variant names the offending location so the message can be
/// shown to a user as-is.
#[derive(Debug, thiserror::Error)]
pub enum DataFormatError {
    /// Input is not valid JSON or has the wrong shape
    #[error("malformed project document: {0}")]
    Json(#[from] serde_json::Error),

    /// Required field absent or null
    #[error("missing required field `{path}`")]
    MissingField {
        /// Location of the field
        path: String,
    },

    /// Required text field present but blank
    #[error("field `{path}` must not be empty")]
    EmptyField {
        /// Location of the field
        path: String,
    },

    /// Date not in `YYYY-MM-DD` form
    #[error("field `{path}` has invalid date `{value}` (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Location of the field
        path: String,
        /// Raw value found
        value: String,
    },

    /// Status not one of the known literals
    #[error("field `{path}` has unknown status `{value}`")]
    UnknownStatus {
        /// Location of the field
        path: String,
        /// Raw value found
        value: String,
    },

    /// Two tasks share an id
    #[error("field `{path}` repeats task id `{id}`")]
    DuplicateTaskId {
        /// Location of the second occurrence
        path: String,
        /// Repeated id
        id: String,
    },
}

/// Errors that can occur while loading a project.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Source could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Input path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Source was read but could not be parsed
    #[error("failed to parse {}: {source}", .path.display())]
    Format {
        /// Input path
        path: PathBuf,
        /// What was wrong with the content
        #[source]
        source: DataFormatError,
    },
}

/// Somewhere a project snapshot can be loaded from.
///
/// This trait allows different input backends to be plugged in.
#[async_trait]
pub trait ProjectSource: Send + Sync {
    /// Load and validate the project.
    async fn load(&self) -> Result<Project>;

    /// Human-readable description of where the project comes from.
    fn describe(&self) -> String;
}
