//! Error handling for the harmonizer.

use std::io;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

use crate::models::{FoodType, RawCode};

/// Specialized error type for the harmonizer
#[derive(Debug, thiserror::Error)]
pub enum HarmonizerError {
    /// A code that is not a whole number in 1..=8 was found in the batch
    #[error("Validation error: subject {subject} has {food} code {value}, expected 1..=8")]
    ValidationError {
        /// Zero-based index of the offending subject within the batch
        subject: usize,
        /// Food type column holding the bad code
        food: FoodType,
        /// The rejected value
        value: RawCode,
    },

    /// Bad configuration (sample count, interval table, config file)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Column missing from an input table
    #[error("Column not found: {column}")]
    ColumnNotFound {
        /// Name of the missing column
        column: String,
    },

    /// Error with schema compatibility
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    ParquetError(#[from] ParquetError),

    /// Error building or reading Arrow arrays
    #[error("Arrow error: {0}")]
    ArrowError(#[from] ArrowError),

    /// Error reading or writing JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl HarmonizerError {
    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Whether this error came from the batch-level code validation
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }
}

/// Result type for harmonizer operations
pub type Result<T> = std::result::Result<T, HarmonizerError>;
