//! Issue status types.

use crate::tracker::ErrorDetail;
use serde::Serialize;

/// Outcome of one create-issue attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IssueStatus {
    /// Issue successfully created.
    Created {
        /// GitHub issue number.
        number: u64,
        /// GitHub issue URL.
        url: String,
    },

    /// Issue creation failed.
    Failed {
        /// HTTP status code, absent when no response was received.
        status_code: Option<u16>,
        /// Response body or client error message.
        error: ErrorDetail,
    },
}
