//! A Rust library for harmonising self-reported fish-consumption frequency
//! codes into exposure categories by Monte Carlo simulation.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{ColumnConfig, HarmonizerConfig};
pub use error::{HarmonizerError, Result};
pub use models::{
    BandProbabilities, ExposureCategory, FoodType, FrequencyCode, HarmonizationResult, RawCode,
    SubjectRecord,
};

// Harmonization
pub use algorithm::harmonization::{
    HarmonizationOutput, HarmonizationSummary, HarmonizedBatch, Harmonizer, IntervalTable,
    harmonize,
};

// Arrow types
pub use arrow::record_batch::RecordBatch;

// Utility functions
pub use utils::io::{read_parquet_table, write_parquet};
