//! IO utilities for file operations
//!
//! This module provides utilities for reading and writing Parquet tables.

pub mod parquet;

// Re-export commonly used functions for convenience
pub use self::parquet::{read_parquet_table, write_parquet};
