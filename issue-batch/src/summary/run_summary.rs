//! Run summary types.

use super::SubmissionResult;

/// Summary of a complete batch run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of records submitted.
    pub total_attempted: usize,

    /// Number of issues successfully created.
    pub created: usize,

    /// Number of submissions that failed.
    pub failed: usize,

    /// Every result, in submission order.
    pub results: Vec<SubmissionResult>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the summary with a submission result.
    pub fn record_result(&mut self, result: SubmissionResult) {
        self.total_attempted += 1;
        if result.success() {
            self.created += 1;
        } else {
            self.failed += 1;
        }
        self.results.push(result);
    }

    /// Returns true if any submission failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns true if every submission created an issue.
    #[must_use]
    pub fn all_success(&self) -> bool {
        self.failed == 0
    }

    /// Iterates over the failed results.
    pub fn failures(&self) -> impl Iterator<Item = &SubmissionResult> {
        self.results.iter().filter(|r| !r.success())
    }
}
