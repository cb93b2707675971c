//! Logging utilities for output and progress tracking
//!
//! This module provides utilities for logging and progress tracking.

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use log::{TableOperation, log_empty_table, log_table_complete, log_table_start};
pub use progress::{create_main_progress_bar, finish_progress_bar, hidden_progress_bar};
