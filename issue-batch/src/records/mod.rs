//! Issue records and the sources they are loaded from.
//!
//! Records come either from a file on disk ([`FileSource`]) or from a document
//! compiled into the binary ([`EmbeddedSource`]). Both go through the same
//! parsing and validation, so a run never starts with a malformed record.

mod error;
mod issue_record;

pub use error::SourceError;
pub use issue_record::IssueRecord;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supported input document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// A JSON array of records.
    Json,
    /// A TOML document with an `[[issues]]` array of tables.
    Toml,
}

impl RecordFormat {
    /// Picks a format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// An ordered supply of issue records.
pub trait IssueSource {
    /// Loads and validates every record, preserving input order.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the input is unreadable, unparsable, or
    /// contains a record without a title.
    fn load(&self) -> Result<Vec<IssueRecord>, SourceError>;

    /// Human-readable description of where records come from.
    fn describe(&self) -> String;
}

/// Records read from a JSON or TOML file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IssueSource for FileSource {
    fn load(&self) -> Result<Vec<IssueRecord>, SourceError> {
        let label = self.path.display().to_string();
        info!(path = %label, "Loading issue records");

        if !self.path.exists() {
            return Err(SourceError::MissingFile { path: label });
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|e| SourceError::IoError {
            path: label.clone(),
            source: e,
        })?;

        parse_records(&label, &contents, RecordFormat::from_path(&self.path))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Records compiled into the binary as a JSON document.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedSource {
    name: &'static str,
    json: &'static str,
}

impl EmbeddedSource {
    /// Wraps an embedded JSON array of records, e.g. from `include_str!`.
    pub const fn new(name: &'static str, json: &'static str) -> Self {
        Self { name, json }
    }
}

impl IssueSource for EmbeddedSource {
    fn load(&self) -> Result<Vec<IssueRecord>, SourceError> {
        parse_records(self.name, self.json, RecordFormat::Json)
    }

    fn describe(&self) -> String {
        format!("embedded backlog '{}'", self.name)
    }
}

#[derive(Deserialize)]
struct TomlDocument {
    #[serde(default)]
    issues: Vec<IssueRecord>,
}

/// Parses and validates a record document.
///
/// `label` names the input in error messages.
///
/// # Errors
///
/// Returns [`SourceError`] on syntax errors or records with an empty title.
pub fn parse_records(
    label: &str,
    contents: &str,
    format: RecordFormat,
) -> Result<Vec<IssueRecord>, SourceError> {
    let records = match format {
        RecordFormat::Json => {
            serde_json::from_str::<Vec<IssueRecord>>(contents).map_err(|e| {
                SourceError::JsonError {
                    path: label.to_string(),
                    source: e,
                }
            })?
        }
        RecordFormat::Toml => {
            toml::from_str::<TomlDocument>(contents)
                .map_err(|e| SourceError::TomlError {
                    path: label.to_string(),
                    source: e,
                })?
                .issues
        }
    };

    validate_records(label, &records)?;
    debug!(path = label, count = records.len(), "Parsed issue records");
    Ok(records)
}

fn validate_records(label: &str, records: &[IssueRecord]) -> Result<(), SourceError> {
    for (idx, record) in records.iter().enumerate() {
        if record.title.trim().is_empty() {
            return Err(SourceError::ValidationError {
                path: label.to_string(),
                message: format!("issue {} has an empty title", idx + 1),
            });
        }
    }
    Ok(())
}
