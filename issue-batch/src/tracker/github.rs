//! GitHub REST API tracker.

use super::{CreatedIssue, ErrorDetail, IssueTracker, TrackerError};
use crate::records::IssueRecord;
use crate::submitter::SubmitterConfig;
use async_trait::async_trait;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;

/// Fields read from a create-issue response.
#[derive(Deserialize)]
struct IssueResponse {
    number: u64,
    html_url: String,
}

/// Fields read from the authenticated-user response.
#[derive(Deserialize)]
struct UserResponse {
    login: String,
}

/// Creates issues in one repository through the GitHub REST API.
///
/// Requests go through octocrab's raw `_post`/`_get` so the exact status code
/// and response body are available for every outcome.
#[derive(Clone)]
pub struct GitHubTracker {
    octocrab: Octocrab,
    issues_route: String,
}

impl GitHubTracker {
    /// Builds an authenticated client for the configured repository.
    ///
    /// Client-side retries are disabled: each call is exactly one request.
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URI is rejected or the client cannot
    /// be built.
    pub fn new(config: &SubmitterConfig) -> Result<Self, octocrab::Error> {
        let credentials = config.credentials();
        let octocrab = Octocrab::builder()
            .personal_token(credentials.token().to_string())
            .base_uri(config.api_base())?
            .add_retry_config(RetryConfig::None)
            .build()?;
        Ok(Self {
            octocrab,
            issues_route: issues_route(credentials.owner(), credentials.repo()),
        })
    }
}

fn issues_route(owner: &str, repo: &str) -> String {
    format!("/repos/{owner}/{repo}/issues")
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn create_issue(&self, record: &IssueRecord) -> Result<CreatedIssue, TrackerError> {
        debug!(route = %self.issues_route, "Posting issue");

        let response = self
            .octocrab
            ._post(self.issues_route.as_str(), Some(record))
            .await?;
        let status_code = response.status().as_u16();
        let body = self.octocrab.body_to_string(response).await?;

        if status_code != STATUS_CREATED {
            return Err(TrackerError::UnexpectedStatus {
                status_code,
                detail: ErrorDetail::from_body(&body),
            });
        }

        let issue: IssueResponse = serde_json::from_str(&body)?;
        Ok(CreatedIssue {
            number: issue.number,
            url: issue.html_url,
        })
    }

    async fn current_user(&self) -> Result<String, TrackerError> {
        let response = self.octocrab._get("/user").await?;
        let status_code = response.status().as_u16();
        let body = self.octocrab.body_to_string(response).await?;

        if status_code != STATUS_OK {
            return Err(TrackerError::UnexpectedStatus {
                status_code,
                detail: ErrorDetail::from_body(&body),
            });
        }

        let user: UserResponse = serde_json::from_str(&body)?;
        Ok(user.login)
    }
}
