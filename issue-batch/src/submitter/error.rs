//! Submitter error types.

/// Fatal errors that stop a run before any issue is submitted.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// No token was supplied.
    #[error("GitHub token is required: pass --token or set GITHUB_TOKEN")]
    MissingToken,

    /// The token was rejected by the API.
    #[error("Invalid GitHub token or authentication failed")]
    InvalidCredentials,

    /// Record loading errors.
    #[error(transparent)]
    Source(#[from] crate::records::SourceError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
}
