//! Rendering errors.

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors raised while producing an artifact.
///
/// Each variant names the artifact so callers can report which output
/// failed while others still succeed.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Destination could not be written
    #[error("failed to write {artifact}: {source}")]
    Write {
        /// Artifact being produced
        artifact: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Document could not be encoded
    #[error("failed to encode {artifact}: {source}")]
    Pdf {
        /// Artifact being produced
        artifact: String,
        /// Underlying encoder error
        #[source]
        source: lopdf::Error,
    },
}

impl RenderError {
    /// Name of the artifact that failed.
    pub fn artifact(&self) -> &str {
        match self {
            RenderError::Write { artifact, .. } | RenderError::Pdf { artifact, .. } => artifact,
        }
    }
}
