//! Monte Carlo simulation of total monthly fish consumption
//!
//! Each reported frequency code only tells us that true consumption lies
//! somewhere inside a bracket. For one subject we draw a plausible monthly
//! count uniformly from each of the four brackets, add them up, and record
//! which exposure band the total falls in. Repeating this `n_sim` times
//! gives the empirical probability mass of each band.
//!
//! Sampling order inside a trial is fixed (sea, river, frozen, canned) so
//! that a given random stream always produces the same totals.

use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::algorithm::harmonization::interval::IntervalTable;
use crate::error::{HarmonizerError, Result};
use crate::models::{
    BandProbabilities, ExposureCategory, ExposureCodes, FoodType, FrequencyCode,
    HarmonizationResult,
};

/// Default number of simulation trials per subject
pub const DEFAULT_N_SIM: usize = 5000;

/// Totals below this are band A
pub const LOWER_CUT: f64 = 1.0;

/// Totals above this are band C; totals in `[LOWER_CUT, UPPER_CUT]` are band B
pub const UPPER_CUT: f64 = 3.0;

/// Classify a simulated monthly total into an exposure band
#[must_use]
pub fn classify_total(total: f64) -> ExposureCategory {
    if total < LOWER_CUT {
        ExposureCategory::A
    } else if total <= UPPER_CUT {
        ExposureCategory::B
    } else {
        ExposureCategory::C
    }
}

/// Derive the seed of one subject's random stream from the batch seed
///
/// Streams are tied to the subject's position in the batch, never to the
/// order in which workers pick subjects up.
#[must_use]
pub const fn derive_subject_seed(batch_seed: u64, index: usize) -> u64 {
    batch_seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Random stream for the subject at `index`
#[must_use]
pub fn subject_rng(batch_seed: u64, index: usize) -> StdRng {
    StdRng::seed_from_u64(derive_subject_seed(batch_seed, index))
}

/// Uniform samplers for one subject's four brackets
#[derive(Debug, Clone)]
pub struct TotalSampler {
    samplers: [Uniform<f64>; 4],
}

impl TotalSampler {
    /// Build samplers for four observed codes, in [`FoodType::ALL`] order
    pub fn new(codes: [FrequencyCode; 4], table: &IntervalTable) -> Result<Self> {
        let [sea, river, frozen, canned] = codes.map(|code| {
            let interval = table.get(code);
            Uniform::new_inclusive(interval.min, interval.max).map_err(|e| {
                HarmonizerError::config(format!("Cannot sample interval for code {code}: {e}"))
            })
        });

        Ok(Self {
            samplers: [sea?, river?, frozen?, canned?],
        })
    }

    /// Draw one plausible monthly count per food type
    pub fn sample_each<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 4] {
        let mut draws = [0.0; 4];
        for food in FoodType::ALL {
            draws[food.index()] = self.samplers[food.index()].sample(rng);
        }
        draws
    }

    /// Draw one plausible total monthly count
    pub fn sample_total<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.sample_each(rng).iter().sum()
    }
}

/// Count how many of `n_sim` simulated totals fall in each band
pub fn simulate_band_counts<R: Rng + ?Sized>(
    codes: [FrequencyCode; 4],
    table: &IntervalTable,
    n_sim: usize,
    rng: &mut R,
) -> Result<[usize; 3]> {
    let sampler = TotalSampler::new(codes, table)?;
    let mut counts = [0usize; 3];
    for _ in 0..n_sim {
        counts[classify_total(sampler.sample_total(rng)).index()] += 1;
    }
    Ok(counts)
}

/// Harmonize one subject's four frequency codes
///
/// A missing code for any food type yields an undefined result and leaves
/// `rng` untouched. Otherwise `4 * n_sim` uniform variates are drawn and the
/// band with the highest empirical mass is assigned (ties go to A, then B).
///
/// # Errors
///
/// Returns a configuration error if `n_sim` is zero.
pub fn harmonize<R: Rng + ?Sized>(
    sea: Option<FrequencyCode>,
    river: Option<FrequencyCode>,
    frozen: Option<FrequencyCode>,
    canned: Option<FrequencyCode>,
    table: &IntervalTable,
    n_sim: usize,
    rng: &mut R,
) -> Result<HarmonizationResult> {
    if n_sim == 0 {
        return Err(HarmonizerError::config("n_sim must be positive"));
    }

    let (Some(sea), Some(river), Some(frozen), Some(canned)) = (sea, river, frozen, canned) else {
        return Ok(HarmonizationResult::undefined());
    };

    let counts = simulate_band_counts([sea, river, frozen, canned], table, n_sim, rng)?;
    Ok(HarmonizationResult::assigned(BandProbabilities::from_counts(
        counts, n_sim,
    )))
}

/// Harmonize a validated set of codes
pub fn harmonize_codes<R: Rng + ?Sized>(
    codes: &ExposureCodes,
    table: &IntervalTable,
    n_sim: usize,
    rng: &mut R,
) -> Result<HarmonizationResult> {
    harmonize(
        codes.get(FoodType::Sea),
        codes.get(FoodType::River),
        codes.get(FoodType::Frozen),
        codes.get(FoodType::Canned),
        table,
        n_sim,
        rng,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    fn code(value: i64) -> Option<FrequencyCode> {
        FrequencyCode::new(value)
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify_total(0.0), ExposureCategory::A);
        assert_eq!(classify_total(0.999), ExposureCategory::A);
        assert_eq!(classify_total(1.0), ExposureCategory::B);
        assert_eq!(classify_total(3.0), ExposureCategory::B);
        assert_eq!(classify_total(3.0001), ExposureCategory::C);
    }

    #[test]
    fn test_draws_stay_inside_intervals() {
        let table = IntervalTable::standard();
        let mut rng = StdRng::seed_from_u64(7);

        for c in FrequencyCode::all() {
            let sampler = TotalSampler::new([c; 4], &table).unwrap();
            let interval = table.get(c);
            for _ in 0..2000 {
                for draw in sampler.sample_each(&mut rng) {
                    assert!(interval.contains(draw), "{draw} outside code {c} interval");
                }
            }
        }
    }

    #[test]
    fn test_all_lowest_codes_is_band_a() {
        let table = IntervalTable::standard();
        for seed in [0, 1, 42, u64::MAX] {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = harmonize(code(1), code(1), code(1), code(1), &table, 500, &mut rng)
                .unwrap();
            assert_eq!(result.category(), Some(ExposureCategory::A));
            assert_eq!(result.p_a(), Some(1.0));
            assert_eq!(result.p_b(), Some(0.0));
            assert_eq!(result.p_c(), Some(0.0));
        }
    }

    #[test]
    fn test_all_highest_codes_is_band_c() {
        let table = IntervalTable::standard();
        let mut rng = StdRng::seed_from_u64(3);
        let result =
            harmonize(code(8), code(8), code(8), code(8), &table, 500, &mut rng).unwrap();
        assert_eq!(result.category(), Some(ExposureCategory::C));
        assert_eq!(result.p_c(), Some(1.0));
        assert_eq!(result.p_a(), Some(0.0));
    }

    #[test]
    fn test_missing_code_is_undefined_and_consumes_nothing() {
        let table = IntervalTable::standard();
        let mut rng = StdRng::seed_from_u64(11);
        let result = harmonize(code(3), None, code(2), code(5), &table, 100, &mut rng).unwrap();

        assert!(!result.is_defined());
        assert_eq!(result.probabilities(), None);
        assert_eq!(rng.next_u64(), StdRng::seed_from_u64(11).next_u64());
    }

    #[test]
    fn test_consumes_four_draws_per_trial() {
        let table = IntervalTable::standard();
        let n_sim = 25;
        let mut rng = StdRng::seed_from_u64(5);
        harmonize(code(2), code(3), code(4), code(5), &table, n_sim, &mut rng).unwrap();

        let mut reference = StdRng::seed_from_u64(5);
        for _ in 0..4 * n_sim {
            reference.next_u64();
        }
        assert_eq!(rng.next_u64(), reference.next_u64());
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let table = IntervalTable::standard();
        let mut rng = StdRng::seed_from_u64(99);
        for sea in 1..=8 {
            for river in [1, 2, 3] {
                let result = harmonize(
                    code(sea),
                    code(river),
                    code(1),
                    code(2),
                    &table,
                    1000,
                    &mut rng,
                )
                .unwrap();
                let total = result.probabilities().unwrap().total();
                assert!((total - 1.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_zero_trials_rejected() {
        let table = IntervalTable::standard();
        let mut rng = StdRng::seed_from_u64(1);
        let err = harmonize(code(1), code(1), code(1), code(1), &table, 0, &mut rng).unwrap_err();
        assert!(matches!(err, HarmonizerError::ConfigError(_)));
    }

    #[test]
    fn test_seed_derivation_is_positional() {
        assert_eq!(derive_subject_seed(10, 0), 10);
        assert_ne!(derive_subject_seed(10, 1), derive_subject_seed(10, 2));
        assert_eq!(
            subject_rng(123, 4).next_u64(),
            subject_rng(123, 4).next_u64()
        );
    }
}
