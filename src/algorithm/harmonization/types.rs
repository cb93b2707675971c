//! Type definitions for harmonization outputs.

use std::time::Duration;

use arrow::record_batch::RecordBatch;

use crate::algorithm::harmonization::summary::HarmonizationSummary;
use crate::models::HarmonizationResult;

/// Result of harmonizing one batch of subjects
#[derive(Debug, Clone)]
pub struct HarmonizationOutput {
    /// One result per input subject, in input order
    pub results: Vec<HarmonizationResult>,
    /// Seed the per-subject streams were derived from
    pub batch_seed: u64,
    /// Simulation trials per subject
    pub n_sim: usize,
    /// Time taken for harmonization
    pub harmonization_time: Duration,
}

impl HarmonizationOutput {
    /// Number of subjects harmonized
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Check if the output is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of subjects with an assigned category
    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_defined()).count()
    }

    /// Descriptive summary of the results
    #[must_use]
    pub fn summary(&self, uncertainty_threshold: f64) -> HarmonizationSummary {
        HarmonizationSummary::from_results(&self.results, uncertainty_threshold)
    }
}

/// A table augmented with harmonization result columns
#[derive(Debug, Clone)]
pub struct HarmonizedBatch {
    /// Input columns followed by the category and probability columns
    pub batch: RecordBatch,
    /// The underlying per-subject results
    pub output: HarmonizationOutput,
}
