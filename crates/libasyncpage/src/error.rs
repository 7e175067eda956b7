use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while loading documents, resolving parameters or writing artifacts.
///
/// Projection itself never fails; these cover the collaborators around it.
#[derive(Error, Debug)]
pub enum AsyncPageError {
    /// Indicates a failure in reading or writing a file, wrapping the underlying IO error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document could not be parsed as JSON.
    #[error("Failed to parse JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The document could not be parsed as YAML.
    #[error("Failed to parse YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The `asyncapi` version field is not a valid semantic version.
    #[error("Invalid AsyncAPI version: {0}")]
    InvalidVersion(String),

    /// The document declares an AsyncAPI version this renderer does not understand.
    #[error("Unsupported AsyncAPI version {0}: only 2.x documents are supported")]
    UnsupportedVersion(String),

    /// A generator parameter carried a value that could not be interpreted.
    #[error("Invalid value for parameter {name}: {value:?}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: String,
        /// Raw value supplied by the caller.
        value: String,
    },

    /// Indicates an error occurred during syntax highlighting.
    #[error("Highlighting error: {0}")]
    Highlight(String),

    /// A rendered artifact could not be moved into place.
    #[error("Failed to write {path}: {source}")]
    Persist {
        /// Destination path of the artifact.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl From<syntect::Error> for AsyncPageError {
    fn from(err: syntect::Error) -> Self {
        Self::Highlight(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AsyncPageError>;
