//! Error types for the Sonde library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Sonde operations.
///
/// Conditions that depend on the data being profiled (a column that is absent
/// from this particular dataset, two required columns that are the same) are
/// not errors: analyzers answer them with [`crate::Section::Empty`]. Every
/// variant here aborts the report run.
#[derive(Debug, Error)]
pub enum SondeError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Invalid report configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A choice analyzer selected a branch that was never registered.
    #[error("No analyzer registered for selection '{key}' (available: {})", .available.join(", "))]
    UnknownChoice { key: String, available: Vec<String> },

    /// A section was built from arrays that disagree with their labels.
    #[error("Shape mismatch in {section}: expected {expected} values, got {actual}")]
    ShapeMismatch {
        section: String,
        expected: usize,
        actual: usize,
    },

    /// Row filter expression could not be parsed.
    #[error("Query error at position {position}: {message}")]
    Query { position: usize, message: String },

    /// A transformer could not be applied.
    #[error("Transform error: {0}")]
    Transform(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SondeError {
    /// Shorthand for a shape mismatch raised by a leaf section.
    pub(crate) fn shape(section: &str, expected: usize, actual: usize) -> Self {
        SondeError::ShapeMismatch {
            section: section.to_string(),
            expected,
            actual,
        }
    }
}

/// Result type alias for Sonde operations.
pub type Result<T> = std::result::Result<T, SondeError>;
