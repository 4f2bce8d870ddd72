// src/error.rs
// Orchestration-level error types

use crate::github::{ClientError, ErrorKind};
use thiserror::Error;

/// Errors propagated out of the orchestrators and the tool dispatcher.
///
/// Per-item failures inside a roadmap never show up here; they are carried
/// in the result tree instead.
#[derive(Error, Debug)]
pub enum RoadmapError {
    /// The roadmap's project could not be created, so nothing else was attempted
    #[error("roadmap aborted: project '{project}' could not be created: {source}")]
    Aborted {
        project: String,
        #[source]
        source: ClientError,
    },

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Result using RoadmapError
pub type Result<T> = std::result::Result<T, RoadmapError>;

impl RoadmapError {
    /// Remote failure classification, when one is involved
    pub fn client_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Aborted { source, .. } => Some(source.kind()),
            Self::Client(err) => Some(err.kind()),
            _ => None,
        }
    }

    /// Whether re-invoking the same tool may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Client(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Convert to user-facing string for MCP tool boundaries
    pub fn to_user_string(&self) -> String {
        if self.is_retryable() {
            format!("{} (retryable)", self)
        } else {
            self.to_string()
        }
    }
}

impl From<RoadmapError> for String {
    fn from(err: RoadmapError) -> Self {
        err.to_string()
    }
}
