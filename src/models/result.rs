//! Harmonized exposure categories and per-subject results.

use std::fmt;

use serde::Serialize;

/// Harmonized three-level total fish consumption band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ExposureCategory {
    /// Low: less than once a month
    A,
    /// Moderate: one to three times a month
    B,
    /// High: more than three times a month
    C,
}

impl ExposureCategory {
    /// All bands, in tie-break order
    pub const ALL: [Self; 3] = [Self::A, Self::B, Self::C];

    /// Position of this band in [`ExposureCategory::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
        }
    }

    /// Single-letter label used in output tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for ExposureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Empirical probability mass in each band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandProbabilities {
    /// Probability of band A
    pub p_a: f64,
    /// Probability of band B
    pub p_b: f64,
    /// Probability of band C
    pub p_c: f64,
}

impl BandProbabilities {
    /// Build probabilities from per-band trial counts
    #[must_use]
    pub fn from_counts(counts: [usize; 3], n_sim: usize) -> Self {
        let n = n_sim as f64;
        Self {
            p_a: counts[0] as f64 / n,
            p_b: counts[1] as f64 / n,
            p_c: counts[2] as f64 / n,
        }
    }

    /// Probability of one band
    #[must_use]
    pub const fn get(&self, category: ExposureCategory) -> f64 {
        match category {
            ExposureCategory::A => self.p_a,
            ExposureCategory::B => self.p_b,
            ExposureCategory::C => self.p_c,
        }
    }

    /// Band with the highest mass; exact ties go to the earlier band (A, then B)
    #[must_use]
    pub fn most_likely(&self) -> ExposureCategory {
        let mut best = ExposureCategory::A;
        for category in &ExposureCategory::ALL[1..] {
            if self.get(*category) > self.get(best) {
                best = *category;
            }
        }
        best
    }

    /// Sum of the three probabilities
    #[must_use]
    pub fn total(&self) -> f64 {
        self.p_a + self.p_b + self.p_c
    }
}

/// Harmonization outcome for one subject
///
/// Either undefined (some response missing: no category and no
/// probabilities) or assigned (category plus all three probabilities).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarmonizationResult {
    category: Option<ExposureCategory>,
    probabilities: Option<BandProbabilities>,
}

impl HarmonizationResult {
    /// Result for a subject with a missing response
    #[must_use]
    pub const fn undefined() -> Self {
        Self {
            category: None,
            probabilities: None,
        }
    }

    /// Result for a fully observed subject, assigning the most likely band
    #[must_use]
    pub fn assigned(probabilities: BandProbabilities) -> Self {
        Self {
            category: Some(probabilities.most_likely()),
            probabilities: Some(probabilities),
        }
    }

    /// Whether a category was assigned
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        self.category.is_some()
    }

    /// Assigned category, `None` if undefined
    #[must_use]
    pub const fn category(&self) -> Option<ExposureCategory> {
        self.category
    }

    /// All three probabilities, `None` if undefined
    #[must_use]
    pub const fn probabilities(&self) -> Option<BandProbabilities> {
        self.probabilities
    }

    /// Probability of band A
    #[must_use]
    pub fn p_a(&self) -> Option<f64> {
        self.probabilities.map(|p| p.p_a)
    }

    /// Probability of band B
    #[must_use]
    pub fn p_b(&self) -> Option<f64> {
        self.probabilities.map(|p| p.p_b)
    }

    /// Probability of band C
    #[must_use]
    pub fn p_c(&self) -> Option<f64> {
        self.probabilities.map(|p| p.p_c)
    }

    /// Probability of the assigned band
    #[must_use]
    pub fn confidence(&self) -> Option<f64> {
        match (self.category, self.probabilities) {
            (Some(category), Some(p)) => Some(p.get(category)),
            _ => None,
        }
    }
}
