//! Frequency-code to monthly-consumption interval lookup.

use serde::{Deserialize, Serialize};

use crate::error::{HarmonizerError, Result};
use crate::models::FrequencyCode;

/// Closed interval of plausible monthly consumption counts for one code
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionInterval {
    /// Lower bound (times per month)
    pub min: f64,
    /// Upper bound (times per month)
    pub max: f64,
}

impl ConsumptionInterval {
    /// Create an interval without validation
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether a value lies inside the closed interval
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Standard lower bounds for codes 1..=8
const STANDARD_MIN: [f64; FrequencyCode::COUNT] = [0.0, 0.0, 1.0, 4.0, 8.0, 20.0, 28.0, 31.0];
/// Standard upper bounds for codes 1..=8
const STANDARD_MAX: [f64; FrequencyCode::COUNT] = [0.0, 1.0, 3.0, 4.0, 16.0, 24.0, 31.0, 60.0];

/// Immutable mapping from every frequency code to its consumption interval
///
/// Built once per run and shared read-only by all workers. Bounds are
/// non-decreasing as the code increases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<ConsumptionInterval>",
    into = "Vec<ConsumptionInterval>"
)]
pub struct IntervalTable {
    intervals: [ConsumptionInterval; FrequencyCode::COUNT],
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl IntervalTable {
    /// The questionnaire's standard table
    #[must_use]
    pub fn standard() -> Self {
        Self {
            intervals: std::array::from_fn(|i| {
                ConsumptionInterval::new(STANDARD_MIN[i], STANDARD_MAX[i])
            }),
        }
    }

    /// Build a custom table, one interval per code in ascending code order
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a bound is negative or not finite,
    /// if `min > max` for any code, or if either bound decreases as the code
    /// increases.
    pub fn new(intervals: [ConsumptionInterval; FrequencyCode::COUNT]) -> Result<Self> {
        for (i, interval) in intervals.iter().enumerate() {
            let code = i + usize::from(FrequencyCode::MIN);
            if !interval.min.is_finite() || !interval.max.is_finite() || interval.min < 0.0 {
                return Err(HarmonizerError::config(format!(
                    "Interval for code {code} must have finite, non-negative bounds"
                )));
            }
            if interval.min > interval.max {
                return Err(HarmonizerError::config(format!(
                    "Interval for code {code} has min {} greater than max {}",
                    interval.min, interval.max
                )));
            }
        }

        for (i, pair) in intervals.windows(2).enumerate() {
            if pair[1].min < pair[0].min || pair[1].max < pair[0].max {
                return Err(HarmonizerError::config(format!(
                    "Interval bounds decrease between codes {} and {}",
                    i + 1,
                    i + 2
                )));
            }
        }

        Ok(Self { intervals })
    }

    /// Interval for a code
    #[must_use]
    pub const fn get(&self, code: FrequencyCode) -> ConsumptionInterval {
        self.intervals[code.table_index()]
    }

    /// All intervals in ascending code order
    #[must_use]
    pub const fn intervals(&self) -> &[ConsumptionInterval; FrequencyCode::COUNT] {
        &self.intervals
    }
}

impl TryFrom<Vec<ConsumptionInterval>> for IntervalTable {
    type Error = HarmonizerError;

    fn try_from(intervals: Vec<ConsumptionInterval>) -> Result<Self> {
        let len = intervals.len();
        let intervals: [ConsumptionInterval; FrequencyCode::COUNT] =
            intervals.try_into().map_err(|_| {
                HarmonizerError::config(format!(
                    "Interval table needs {} entries, found {len}",
                    FrequencyCode::COUNT
                ))
            })?;
        Self::new(intervals)
    }
}

impl From<IntervalTable> for Vec<ConsumptionInterval> {
    fn from(table: IntervalTable) -> Self {
        table.intervals.to_vec()
    }
}
