#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod pacing;
pub mod records;
pub mod submitter;
pub mod summary;
pub mod tracker;

pub use pacing::{delay_from_secs, Pacer, PacingError, TokioPacer, DEFAULT_DELAY, MAX_DELAY};
pub use records::{
    parse_records, EmbeddedSource, FileSource, IssueRecord, IssueSource, RecordFormat,
    SourceError,
};
pub use submitter::{
    print_dry_run_preview, resolve_token, Credentials, SubmitError, Submitter, SubmitterConfig,
    DEFAULT_API_BASE, TOKEN_ENV_VAR,
};
pub use summary::{IssueStatus, RunSummary, SubmissionResult};
pub use tracker::{CreatedIssue, ErrorDetail, GitHubTracker, IssueTracker, TrackerError};
