//! Monte Carlo harmonisation of fish-consumption frequency codes
//!
//! This module turns four ordinal frequency codes per subject (sea, river,
//! frozen and canned fish) into one of three total-consumption bands. It
//! includes:
//!
//! 1. The code to monthly-count interval table
//! 2. Batch-level validation of raw codes
//! 3. The per-subject simulation and band assignment
//! 4. Sequential and parallel drivers with reproducible random streams
//! 5. A descriptive summary of the assigned bands

pub mod harmonizer;
pub mod interval;
pub mod parallel;
pub mod sequential;
pub mod simulation;
pub mod summary;
pub mod types;
pub mod validation;

// Re-export key types
pub use harmonizer::Harmonizer;
pub use interval::{ConsumptionInterval, IntervalTable};
pub use simulation::{DEFAULT_N_SIM, classify_total, harmonize, harmonize_codes};
pub use summary::{CategoryCount, HarmonizationSummary, round_to};
pub use types::{HarmonizationOutput, HarmonizedBatch};
pub use validation::{InvalidCode, find_invalid_codes, validate_records};
