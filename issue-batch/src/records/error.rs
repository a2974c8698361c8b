//! Record source error types.

use thiserror::Error;

/// Errors that can occur while loading issue records.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON content.
    #[error("Invalid JSON in '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to parse TOML content.
    #[error("Invalid TOML in '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A record failed validation.
    #[error("Validation error in '{path}': {message}")]
    ValidationError { path: String, message: String },

    /// Input file does not exist.
    #[error("File '{path}' not found")]
    MissingFile { path: String },
}
