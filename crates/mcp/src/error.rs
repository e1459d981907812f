#![forbid(unsafe_code)]

use wf_storage::StoreError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum DispatchError {
    #[error("Unsupported tool: {0}")]
    UnsupportedTool(String),
    #[error("Unsupported workflow_docs action: {0}")]
    UnsupportedAction(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("tool schema error: {0}")]
    Schema(String),
    #[error("{op} {path}: {source}")]
    Io {
        op: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("transport: {0}")]
    Transport(String),
}

impl DispatchError {
    pub(crate) fn io(op: &'static str, path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_string_lossy().to_string(),
            source,
        }
    }

    pub(crate) fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedTool(_) => "UNSUPPORTED_TOOL",
            Self::UnsupportedAction(_) => "UNSUPPORTED_ACTION",
            Self::Store(err) => err.code(),
            Self::Schema(_) => "SCHEMA_ERROR",
            Self::Io { .. } => "FILESYSTEM_ERROR",
            Self::Json(_) => "INVALID_JSON",
            Self::Transport(_) => "TRANSPORT_ERROR",
        }
    }
}
