//! Core harmonization driver
//!
//! This module implements the `Harmonizer` struct which orchestrates a run:
//! a validation pass over the whole batch, then the per-subject simulation.

use std::time::Instant;

use arrow::record_batch::RecordBatch;
use log::info;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::algorithm::harmonization::parallel::perform_parallel_harmonization;
use crate::algorithm::harmonization::sequential::perform_sequential_harmonization;
use crate::algorithm::harmonization::types::{HarmonizationOutput, HarmonizedBatch};
use crate::algorithm::harmonization::validation::validate_records;
use crate::config::HarmonizerConfig;
use crate::error::Result;
use crate::models::SubjectRecord;
use crate::utils::arrow::{append_result_columns, extract_subject_records};
use crate::utils::logging::{create_main_progress_bar, finish_progress_bar, hidden_progress_bar};

/// Harmonizer for turning frequency codes into exposure bands
#[derive(Debug, Clone)]
pub struct Harmonizer {
    /// Harmonization configuration
    config: HarmonizerConfig,
}

impl Harmonizer {
    /// Create a harmonizer, rejecting invalid configurations
    pub fn new(config: HarmonizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &HarmonizerConfig {
        &self.config
    }

    /// Seed for this batch, drawing one from OS entropy if none is configured
    fn batch_seed(&self) -> u64 {
        self.config.random_seed.unwrap_or_else(|| {
            let seed = StdRng::from_os_rng().next_u64();
            info!("No random seed configured, using {seed} (pass it as the seed to reproduce)");
            seed
        })
    }

    /// Harmonize a batch of subject records
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` without harmonizing anything if any subject
    /// in the batch has a code outside 1..=8.
    pub fn harmonize_records(&self, records: &[SubjectRecord]) -> Result<HarmonizationOutput> {
        let start_time = Instant::now();

        let codes = validate_records(records)?;
        let batch_seed = self.batch_seed();
        let n_sim = self.config.n_sim;
        let table = &self.config.interval_table;

        info!(
            "Harmonizing {} subjects with {} trials each",
            codes.len(),
            n_sim
        );

        let pb = if self.config.show_progress {
            create_main_progress_bar(codes.len() as u64, Some("Harmonizing fish exposure"))
        } else {
            hidden_progress_bar(codes.len() as u64)
        };

        let use_parallel =
            self.config.use_parallel && codes.len() >= self.config.parallel_threshold;

        let results = if use_parallel {
            perform_parallel_harmonization(&codes, table, n_sim, batch_seed, &pb)?
        } else {
            perform_sequential_harmonization(&codes, table, n_sim, batch_seed, &pb)?
        };

        finish_progress_bar(&pb, Some("Harmonization complete"));

        let elapsed = start_time.elapsed();
        let output = HarmonizationOutput {
            results,
            batch_seed,
            n_sim,
            harmonization_time: elapsed,
        };

        info!(
            "Harmonization complete: {} of {} subjects assigned in {:.2?} ({:.2} subjects/sec)",
            output.defined_count(),
            output.len(),
            elapsed,
            output.len() as f64 / elapsed.as_secs_f64()
        );

        Ok(output)
    }

    /// Harmonize every row of a table and append the result columns
    ///
    /// Rows are subjects; all other columns pass through unchanged.
    pub fn harmonize_batch(&self, batch: &RecordBatch) -> Result<HarmonizedBatch> {
        let columns = &self.config.columns;
        let records = extract_subject_records(batch, columns)?;
        let output = self.harmonize_records(&records)?;
        let batch = append_result_columns(batch, &output.results, columns)?;
        Ok(HarmonizedBatch { batch, output })
    }
}
