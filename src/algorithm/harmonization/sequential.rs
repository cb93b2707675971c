//! Sequential harmonization
//!
//! This module implements the single-threaded driver, used for small
//! batches or when parallel processing is disabled.

use indicatif::ProgressBar;
use log::info;

use crate::algorithm::harmonization::interval::IntervalTable;
use crate::algorithm::harmonization::simulation::{harmonize_codes, subject_rng};
use crate::error::Result;
use crate::models::{ExposureCodes, HarmonizationResult};

/// Harmonize every subject in order on the current thread
pub fn perform_sequential_harmonization(
    codes: &[ExposureCodes],
    table: &IntervalTable,
    n_sim: usize,
    batch_seed: u64,
    pb: &ProgressBar,
) -> Result<Vec<HarmonizationResult>> {
    info!("Using sequential processing for {} subjects", codes.len());

    let mut results = Vec::with_capacity(codes.len());
    for (index, subject) in codes.iter().enumerate() {
        let mut rng = subject_rng(batch_seed, index);
        results.push(harmonize_codes(subject, table, n_sim, &mut rng)?);
        pb.inc(1);
    }

    Ok(results)
}
