//! Error types for mergepurge-core

use std::fmt;

use thiserror::Error;

use crate::tagging::{AddressLabel, NameLabel, Token};

/// Result type alias for mergepurge operations
pub type Result<T> = std::result::Result<T, MergePurgeError>;

/// Main error type for mergepurge operations
#[derive(Error, Debug)]
pub enum MergePurgeError {
    /// The address tagger repeated a single-valued label (strict mode only)
    #[error("Ambiguous address: {0}")]
    AmbiguousAddress(#[from] AmbiguousLabel<AddressLabel>),

    /// The name tagger repeated a single-valued label (strict mode only)
    #[error("Ambiguous name: {0}")]
    AmbiguousName(#[from] AmbiguousLabel<NameLabel>),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Dataset errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// A tagger assigned the same label to two non-adjacent tokens.
///
/// Carries the offending label and the full per-token sequence so a caller
/// running in lenient mode can hand it to the ambiguity resolver.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("label {label} repeated in {} tagged tokens", .tokens.len())]
pub struct AmbiguousLabel<L: fmt::Debug + fmt::Display> {
    pub label: L,
    pub tokens: Vec<Token<L>>,
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A value outside its allowed range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// Field weights that cannot produce a score
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// TOML decoding failed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML encoding failed
    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// JSON decoding or encoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Dataset errors
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Requested column does not exist
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Appended column has the wrong number of values
    #[error("Column {name} has {actual} values, dataset has {expected} rows")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// A row has a different number of cells than the header
    #[error("Row {row} has {actual} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Delimited text could not be read or written
    #[cfg(feature = "csv")]
    #[error("Delimited text error: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
