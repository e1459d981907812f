#![forbid(unsafe_code)]

use std::path::Path;
use wf_core::paths::DocPathError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Path escapes docs directory: {path}")]
    PathEscape { path: String },
    #[error("workflow_docs.{action} requires path")]
    MissingPath { action: &'static str },
    #[error("workflow_docs.update requires content")]
    MissingContent,
    #[error("workflow_docs.find requires a non-empty query")]
    InvalidQuery,
    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(op: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_string_lossy().to_string(),
            source,
        }
    }

    /// Stable machine-readable code, mirrored into tool error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PathEscape { .. } => "PATH_ESCAPE",
            Self::MissingPath { .. } => "MISSING_PATH",
            Self::MissingContent => "MISSING_CONTENT",
            Self::InvalidQuery => "INVALID_QUERY",
            Self::Io { .. } => "FILESYSTEM_ERROR",
        }
    }
}

impl From<DocPathError> for StoreError {
    fn from(value: DocPathError) -> Self {
        match value {
            DocPathError::Escape { raw } => Self::PathEscape { path: raw },
        }
    }
}
