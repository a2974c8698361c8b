//! Sequential batch submission of issue records.
//!
//! Records are submitted strictly one at a time, in input order, with a fixed
//! pause between consecutive requests. A failed record never stops the batch;
//! its outcome is recorded and the next record is submitted.

mod config;
mod error;

pub use config::{resolve_token, Credentials, SubmitterConfig, DEFAULT_API_BASE, TOKEN_ENV_VAR};
pub use error::SubmitError;

use crate::pacing::{Pacer, TokioPacer};
use crate::records::IssueRecord;
use crate::summary::{IssueStatus, RunSummary, SubmissionResult};
use crate::tracker::{GitHubTracker, IssueTracker};
use std::time::Duration;
use tracing::{error, info, info_span, warn, Instrument};

/// Titles longer than this are cut in progress lines.
const PROGRESS_TITLE_CHARS: usize = 60;

/// Submits issue records to a tracker, pausing between requests.
pub struct Submitter<T, P = TokioPacer> {
    tracker: T,
    pacer: P,
    delay: Duration,
}

impl Submitter<GitHubTracker, TokioPacer> {
    /// Builds a submitter for the GitHub repository in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::Octocrab`] if the GitHub client cannot be built.
    pub fn github(config: &SubmitterConfig) -> Result<Self, SubmitError> {
        let tracker = GitHubTracker::new(config)?;
        Ok(Self::new(tracker, TokioPacer, config.delay()))
    }
}

impl<T: IssueTracker, P: Pacer> Submitter<T, P> {
    /// Creates a submitter from its parts.
    pub fn new(tracker: T, pacer: P, delay: Duration) -> Self {
        Self {
            tracker,
            pacer,
            delay,
        }
    }

    /// Returns the underlying tracker.
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Confirms the token is accepted, returning the authenticated login.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InvalidCredentials`] if the identity lookup fails
    /// for any reason.
    pub async fn authenticate(&self) -> Result<String, SubmitError> {
        match self.tracker.current_user().await {
            Ok(login) => {
                info!(login = %login, "Authenticated");
                Ok(login)
            }
            Err(e) => {
                warn!(error = %e, "Credential validation failed");
                Err(SubmitError::InvalidCredentials)
            }
        }
    }

    /// Returns whether the token is accepted.
    pub async fn validate_credentials(&self) -> bool {
        self.authenticate().await.is_ok()
    }

    /// Submits one record. Performs exactly one create request and never retries.
    pub async fn submit_one(&self, index: usize, record: &IssueRecord) -> SubmissionResult {
        let span = info_span!("submit_issue", index, title = %record.title);

        async {
            let status = match self.tracker.create_issue(record).await {
                Ok(issue) => {
                    info!(issue_number = issue.number, "Issue created successfully");
                    IssueStatus::Created {
                        number: issue.number,
                        url: issue.url,
                    }
                }
                Err(e) => {
                    error!(error = %e, "Failed to create issue");
                    IssueStatus::Failed {
                        status_code: e.status_code(),
                        error: e.into_detail(),
                    }
                }
            };

            SubmissionResult {
                index,
                title: record.title.clone(),
                status,
            }
        }
        .instrument(span)
        .await
    }

    /// Submits every record in order and returns the summary.
    ///
    /// Pauses for the configured delay between consecutive submissions, never
    /// after the last one.
    pub async fn submit_all(&self, records: &[IssueRecord]) -> RunSummary {
        let total = records.len();
        let mut summary = RunSummary::new();
        info!(count = total, "Submitting issues");

        for (idx, record) in records.iter().enumerate() {
            println!(
                "[{}/{}] Creating: {}...",
                idx + 1,
                total,
                record.short_title(PROGRESS_TITLE_CHARS)
            );

            let result = self.submit_one(idx, record).await;
            print_outcome(&result);
            summary.record_result(result);

            if idx + 1 < total {
                self.pacer.pause(self.delay).await;
            }
        }

        info!(
            created = summary.created,
            failed = summary.failed,
            total = summary.total_attempted,
            "Batch complete"
        );
        summary
    }

    /// Validates credentials, then submits every record.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitError::InvalidCredentials`] without submitting anything
    /// if the token is rejected.
    pub async fn run(&self, records: &[IssueRecord]) -> Result<RunSummary, SubmitError> {
        self.authenticate().await?;
        Ok(self.submit_all(records).await)
    }
}

fn print_outcome(result: &SubmissionResult) {
    match &result.status {
        IssueStatus::Created { number, url } => {
            println!("  ✓ Created issue #{number}: {url}");
        }
        IssueStatus::Failed { status_code, error } => {
            match status_code {
                Some(code) => println!("  ✗ Failed: Status {code}"),
                None => println!("  ✗ Failed: no response"),
            }
            println!("    Error: {error}");
        }
    }
}

/// Prints what a run would create, without contacting the API.
pub fn print_dry_run_preview(records: &[IssueRecord], repository: &str) {
    println!("DRY RUN MODE - No issues will be created");
    println!("{}", "-".repeat(60));
    println!(
        "Would create {} issues in {}:\n",
        records.len(),
        repository
    );

    for (i, record) in records.iter().enumerate() {
        println!("{}. {}", i + 1, record.title);
        if record.labels.is_empty() {
            println!("   Labels: (none)");
        } else {
            println!("   Labels: {}", record.labels.join(", "));
        }
        println!();
    }
}
