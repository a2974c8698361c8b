//! Tracker error types.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Body of a failed API response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Body parsed as JSON.
    Json(serde_json::Value),

    /// Body that was not valid JSON, or a client-side error message.
    Text(String),
}

impl ErrorDetail {
    /// Interprets a response body, preferring structured JSON.
    pub fn from_body(body: &str) -> Self {
        if body.trim().is_empty() {
            return Self::Text("Unknown error".to_string());
        }
        serde_json::from_str(body).map_or_else(|_| Self::Text(body.to_string()), Self::Json)
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Errors returned by an [`IssueTracker`](super::IssueTracker).
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The API answered, but not with the expected status.
    #[error("GitHub API returned status {status_code}: {detail}")]
    UnexpectedStatus {
        status_code: u16,
        detail: ErrorDetail,
    },

    /// A successful response carried a body we could not decode.
    #[error("Malformed GitHub API response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The request did not produce a response.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),
}

impl TrackerError {
    /// HTTP status code, when a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Converts the error into the detail reported for a failed submission.
    pub fn into_detail(self) -> ErrorDetail {
        match self {
            Self::UnexpectedStatus { detail, .. } => detail,
            other => ErrorDetail::Text(other.to_string()),
        }
    }
}
