// src/github/error.rs
// Classified failures returned by the resource clients

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure classification shared by both API surfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Auth,
    NotFound,
    Validation,
    RateLimit,
    Transient,
    Unknown,
}

/// Error returned by a single remote call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("rate limited: {0}")]
    RateLimit(String),

    #[error("transient failure: {0}")]
    Transient(String),

    #[error("unexpected failure: {0}")]
    Unknown(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn transient(msg: impl Into<String>) -> Self {
        Self::Transient(msg.into())
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Auth(_) => ErrorKind::Auth,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::RateLimit(_) => ErrorKind::RateLimit,
            Self::Transient(_) => ErrorKind::Transient,
            Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// The message without the classification prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Auth(m)
            | Self::NotFound(m)
            | Self::Validation(m)
            | Self::RateLimit(m)
            | Self::Transient(m)
            | Self::Unknown(m) => m,
        }
    }

    /// Whether the caller may safely retry the same call later
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_) | Self::RateLimit(_))
    }

    /// Classify a non-success HTTP response.
    ///
    /// `body` is the raw response text; GitHub puts the human-readable
    /// reason in a top-level `message` field.
    pub fn from_status(status: StatusCode, headers: &HeaderMap, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| format!("HTTP {}", status));

        match status.as_u16() {
            401 => Self::Auth(message),
            403 => {
                let exhausted = headers
                    .get("x-ratelimit-remaining")
                    .and_then(|v| v.to_str().ok())
                    .is_some_and(|v| v.trim() == "0");
                if exhausted || message.to_lowercase().contains("rate limit") {
                    Self::RateLimit(message)
                } else {
                    Self::Auth(message)
                }
            }
            404 | 410 => Self::NotFound(message),
            400 | 422 => Self::Validation(message),
            429 => Self::RateLimit(message),
            s if (500..600).contains(&s) => Self::Transient(message),
            _ => Self::Unknown(message),
        }
    }

    /// Classify a GraphQL `errors[].type` value
    pub fn from_graphql_type(error_type: Option<&str>, message: String) -> Self {
        match error_type {
            Some("NOT_FOUND") => Self::NotFound(message),
            Some("FORBIDDEN") | Some("INSUFFICIENT_SCOPES") => Self::Auth(message),
            Some("RATE_LIMITED") => Self::RateLimit(message),
            Some("UNPROCESSABLE") => Self::Validation(message),
            _ => Self::Unknown(message),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            Self::Transient(err.to_string())
        } else if let Some(status) = err.status() {
            Self::from_status(status, &HeaderMap::new(), "")
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

/// Pull GitHub's `message` (plus any field-level `errors`) out of an error body
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.to_string();

    let details: Vec<String> = value
        .get("errors")
        .and_then(|e| e.as_array())
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| {
                    e.get("message")
                        .and_then(|m| m.as_str())
                        .map(String::from)
                        .or_else(|| {
                            let field = e.get("field")?.as_str()?;
                            let code = e.get("code")?.as_str()?;
                            Some(format!("{} {}", field, code))
                        })
                })
                .collect()
        })
        .unwrap_or_default();

    if details.is_empty() {
        Some(message)
    } else {
        Some(format!("{} ({})", message, details.join("; ")))
    }
}
