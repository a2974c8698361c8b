//! A single issue to be created.

use serde::{Deserialize, Serialize};

/// One issue description read from a record source.
///
/// Serializes to exactly the create-issue payload (`title`, `body`, `labels`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRecord {
    /// Issue title. Never empty once loaded through an [`IssueSource`](super::IssueSource).
    pub title: String,

    /// Markdown body.
    #[serde(default)]
    pub body: String,

    /// Label names, in order.
    #[serde(default)]
    pub labels: Vec<String>,
}

impl IssueRecord {
    /// Creates a record with the given title and body and no labels.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            labels: Vec::new(),
        }
    }

    /// Adds labels to the record.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Returns the title cut to at most `max_chars` characters.
    pub fn short_title(&self, max_chars: usize) -> &str {
        match self.title.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &self.title[..byte_idx],
            None => &self.title,
        }
    }
}
