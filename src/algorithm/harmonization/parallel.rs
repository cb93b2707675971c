//! Parallel harmonization
//!
//! This module implements the parallel driver for large batches, using
//! Rayon. Every subject draws from its own stream seeded by its position,
//! so the output matches the sequential driver bit for bit.

use indicatif::ProgressBar;
use log::info;
use rayon::prelude::*;

use crate::algorithm::harmonization::interval::IntervalTable;
use crate::algorithm::harmonization::simulation::{harmonize_codes, subject_rng};
use crate::error::Result;
use crate::models::{ExposureCodes, HarmonizationResult};

/// Harmonize subjects across the Rayon thread pool
pub fn perform_parallel_harmonization(
    codes: &[ExposureCodes],
    table: &IntervalTable,
    n_sim: usize,
    batch_seed: u64,
    pb: &ProgressBar,
) -> Result<Vec<HarmonizationResult>> {
    let num_threads = rayon::current_num_threads();
    info!(
        "Using parallel processing with {num_threads} threads for {} subjects",
        codes.len()
    );

    codes
        .par_iter()
        .enumerate()
        .map(|(index, subject)| {
            let mut rng = subject_rng(batch_seed, index);
            let result = harmonize_codes(subject, table, n_sim, &mut rng);
            pb.inc(1);
            result
        })
        .collect()
}
