//! Descriptive summary of a harmonized batch
//!
//! Produces the category distribution table reported alongside the
//! harmonized data: counts and shares per band, mean band probabilities and
//! how many assignments were made with low confidence.

use std::fmt;

use itertools::Itertools;
use serde::Serialize;

use crate::models::{BandProbabilities, ExposureCategory, HarmonizationResult};

/// Round a value to a fixed number of decimals for reporting
#[must_use]
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Count of subjects assigned to one band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    /// The band
    pub category: ExposureCategory,
    /// Number of subjects assigned to it
    pub count: usize,
    /// Percentage of defined subjects, rounded to one decimal
    pub percent: f64,
}

/// Summary statistics for a harmonized batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmonizationSummary {
    /// Number of subjects in the batch
    pub total_subjects: usize,
    /// Subjects left undefined because of a missing response
    pub undefined_subjects: usize,
    /// Per-band counts, in A, B, C order
    pub categories: Vec<CategoryCount>,
    /// Mean probability of band A over defined subjects
    pub mean_p_a: Option<f64>,
    /// Mean probability of band B over defined subjects
    pub mean_p_b: Option<f64>,
    /// Mean probability of band C over defined subjects
    pub mean_p_c: Option<f64>,
    /// Mean probability of the assigned band
    pub mean_confidence: Option<f64>,
    /// Assignments whose confidence is below `uncertainty_threshold`
    pub uncertain_assignments: usize,
    /// Threshold used for `uncertain_assignments`
    pub uncertainty_threshold: f64,
}

impl HarmonizationSummary {
    /// Summarise a set of results
    #[must_use]
    pub fn from_results(results: &[HarmonizationResult], uncertainty_threshold: f64) -> Self {
        let defined = results
            .iter()
            .filter_map(|r| Some((r.category()?, r.probabilities()?)))
            .collect_vec();
        let n_defined = defined.len();

        let counts = defined.iter().counts_by(|(category, _)| *category);
        let categories = ExposureCategory::ALL
            .iter()
            .map(|category| {
                let count = counts.get(category).copied().unwrap_or(0);
                CategoryCount {
                    category: *category,
                    count,
                    percent: if n_defined > 0 {
                        round_to(100.0 * count as f64 / n_defined as f64, 1)
                    } else {
                        0.0
                    },
                }
            })
            .collect_vec();

        let mean = |f: fn(&(ExposureCategory, BandProbabilities)) -> f64| {
            (n_defined > 0)
                .then(|| round_to(defined.iter().map(f).sum::<f64>() / n_defined as f64, 3))
        };

        let uncertain_assignments = defined
            .iter()
            .filter(|(category, p)| p.get(*category) < uncertainty_threshold)
            .count();

        Self {
            total_subjects: results.len(),
            undefined_subjects: results.len() - n_defined,
            categories,
            mean_p_a: mean(|(_, p)| p.p_a),
            mean_p_b: mean(|(_, p)| p.p_b),
            mean_p_c: mean(|(_, p)| p.p_c),
            mean_confidence: mean(|(category, p)| p.get(*category)),
            uncertain_assignments,
            uncertainty_threshold,
        }
    }

    /// Number of subjects with an assigned band
    #[must_use]
    pub const fn defined_subjects(&self) -> usize {
        self.total_subjects - self.undefined_subjects
    }

    /// Count for one band
    #[must_use]
    pub fn count(&self, category: ExposureCategory) -> usize {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map_or(0, |c| c.count)
    }
}

fn fmt_optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

impl fmt::Display for HarmonizationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fish Exposure Harmonization Summary:")?;
        writeln!(f, "  Total subjects: {}", self.total_subjects)?;
        writeln!(f, "  Undefined (missing response): {}", self.undefined_subjects)?;
        writeln!(f)?;
        writeln!(f, "Category | Count    | Percent")?;
        writeln!(f, "---------|----------|--------")?;
        for c in &self.categories {
            writeln!(f, "{:<8} | {:>8} | {:>6.1}%", c.category, c.count, c.percent)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "  Mean probabilities: A {}, B {}, C {}",
            fmt_optional(self.mean_p_a),
            fmt_optional(self.mean_p_b),
            fmt_optional(self.mean_p_c)
        )?;
        writeln!(
            f,
            "  Mean confidence of assigned band: {}",
            fmt_optional(self.mean_confidence)
        )?;
        write!(
            f,
            "  Uncertain assignments (confidence < {:.2}): {}",
            self.uncertainty_threshold, self.uncertain_assignments
        )
    }
}
