//! Per-item outcomes and the run summary.

mod result;
mod run_summary;
mod status;

pub use result::SubmissionResult;
pub use run_summary::RunSummary;
pub use status::IssueStatus;
