//! Submission result types.

use super::IssueStatus;
use crate::tracker::ErrorDetail;
use serde::Serialize;

/// Result of submitting a single record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionResult {
    /// Zero-based position of the record in the input.
    pub index: usize,

    /// Title of the submitted record.
    pub title: String,

    /// Creation outcome.
    #[serde(flatten)]
    pub status: IssueStatus,
}

impl SubmissionResult {
    /// Returns true if the issue was created.
    #[must_use]
    pub fn success(&self) -> bool {
        matches!(self.status, IssueStatus::Created { .. })
    }

    /// Number of the created issue.
    pub fn issue_number(&self) -> Option<u64> {
        match &self.status {
            IssueStatus::Created { number, .. } => Some(*number),
            IssueStatus::Failed { .. } => None,
        }
    }

    /// URL of the created issue.
    pub fn issue_url(&self) -> Option<&str> {
        match &self.status {
            IssueStatus::Created { url, .. } => Some(url),
            IssueStatus::Failed { .. } => None,
        }
    }

    /// HTTP status of a failed attempt.
    pub fn status_code(&self) -> Option<u16> {
        match &self.status {
            IssueStatus::Failed { status_code, .. } => *status_code,
            IssueStatus::Created { .. } => None,
        }
    }

    /// Error payload of a failed attempt.
    pub fn error_detail(&self) -> Option<&ErrorDetail> {
        match &self.status {
            IssueStatus::Failed { error, .. } => Some(error),
            IssueStatus::Created { .. } => None,
        }
    }
}
