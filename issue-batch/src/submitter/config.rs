//! Submitter configuration.

use super::SubmitError;
use crate::pacing::DEFAULT_DELAY;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Environment variable consulted when no token is passed explicitly.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Default GitHub REST API root.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Token and target repository for a run.
#[derive(Clone)]
pub struct Credentials {
    token: String,
    owner: String,
    repo: String,
}

impl Credentials {
    /// Creates credentials for `owner/repo`.
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Returns the API token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Returns the repository in `owner/repo` form.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .finish()
    }
}

/// Configuration for a batch submission run.
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Token and target repository.
    credentials: Credentials,
    /// REST API root, [`DEFAULT_API_BASE`] when unset.
    api_base: Option<Url>,
    /// Fixed wait between consecutive submissions.
    delay: Duration,
}

impl SubmitterConfig {
    /// Creates a configuration targeting the public GitHub API with the default delay.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base: None,
            delay: DEFAULT_DELAY,
        }
    }

    /// Sets a custom API root, e.g. a GitHub Enterprise server or a test endpoint.
    pub fn with_api_base(mut self, api_base: Url) -> Self {
        self.api_base = Some(api_base);
        self
    }

    /// Sets the delay between submissions.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the API root.
    pub fn api_base(&self) -> &str {
        self.api_base.as_ref().map_or(DEFAULT_API_BASE, Url::as_str)
    }

    /// Returns the delay between submissions.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns true when targeting the public github.com API.
    pub fn is_public_github(&self) -> bool {
        self.api_base
            .as_ref()
            .map_or(true, |url| url.host_str() == Some("api.github.com"))
    }
}

/// Picks the API token, preferring an explicit value over [`TOKEN_ENV_VAR`].
///
/// Blank values count as absent.
///
/// # Errors
///
/// Returns [`SubmitError::MissingToken`] when neither source provides a token.
pub fn resolve_token(explicit: Option<String>) -> Result<String, SubmitError> {
    if let Some(token) = explicit.filter(|t| !t.trim().is_empty()) {
        debug!("Using token from command line");
        return Ok(token);
    }

    match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => {
            debug!(var = TOKEN_ENV_VAR, "Using token from environment");
            Ok(token)
        }
        _ => Err(SubmitError::MissingToken),
    }
}
