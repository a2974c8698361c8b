//! Issue tracker abstraction.
//!
//! The submitter talks to the outside world only through [`IssueTracker`], so
//! tests can swap in a scripted fake for the GitHub client.

mod error;
mod github;

pub use error::{ErrorDetail, TrackerError};
pub use github::GitHubTracker;

use crate::records::IssueRecord;
use async_trait::async_trait;

/// An issue the tracker reported as created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedIssue {
    /// Issue number in the target repository.
    pub number: u64,

    /// Browsable URL of the issue.
    pub url: String,
}

#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Creates one issue from the record. Performs exactly one request.
    async fn create_issue(&self, record: &IssueRecord) -> Result<CreatedIssue, TrackerError>;

    /// Returns the login of the authenticated user.
    async fn current_user(&self) -> Result<String, TrackerError>;
}
