//! Arrow data handling utilities
//!
//! This module contains utilities for reading subject records out of Arrow
//! record batches and writing harmonization results back as new columns.

pub mod array_utils;
pub mod augment;
pub mod extractors;

// Re-export commonly used functions for convenience
pub use array_utils::{downcast_array, get_column};
pub use augment::append_result_columns;
pub use extractors::{extract_code_column, extract_subject_ids, extract_subject_records};
