//! Synthetic training-set generation.
//!
//! Every prediction request trains against a freshly generated, rule-labeled
//! sample set. The random source is passed in so tests and the seeded dev
//! mode can reproduce a request exactly.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{FinderError, Observation, Sample};
use crate::zones::{ALL_SPECIES, Zone};

/// Sample count used when the configuration does not override it.
pub const DEFAULT_SAMPLE_COUNT: usize = 150;

/// Bounds of the uniform feature draws. Month is drawn from 1..=12.
pub const TEMPERATURE_RANGE_C: (f64, f64) = (26.0, 32.0);
pub const CURRENT_RANGE: (f64, f64) = (-1.0, 1.0);
pub const CHLOROPHYLL_RANGE: (f64, f64) = (0.1, 0.5);

/// Months of the post-monsoon warm-water migration.
pub const MIGRATION_MONTHS: [u32; 3] = [10, 11, 12];

/// Ground-truth zone labeling rule. First matching branch wins:
///
/// 1. `temperature > 29` and month in Oct–Dec and `current > 0` → Calangute
/// 2. `temperature < 28` and `current < 0` → Colva
/// 3. otherwise → Baga
///
/// All comparisons are strict; a value sitting exactly on a threshold
/// falls through to the next branch.
pub fn label_zone(temperature: f64, month: u32, current: f64) -> Zone {
    if temperature > 29.0 && MIGRATION_MONTHS.contains(&month) && current > 0.0 {
        Zone::Calangute
    } else if temperature < 28.0 && current < 0.0 {
        Zone::Colva
    } else {
        Zone::Baga
    }
}

/// Applies `label_zone` to a whole observation.
pub fn label_observation(obs: &Observation) -> Zone {
    label_zone(obs.temperature, obs.month, obs.current)
}

/// Generates `count` rule-labeled samples.
///
/// When `species_aware` is set each sample also carries a uniformly drawn
/// species label. Returns `EmptyTrainingSet` for `count == 0`.
pub fn generate<R: Rng + ?Sized>(
    count: usize,
    species_aware: bool,
    rng: &mut R,
) -> Result<Vec<Sample>, FinderError> {
    if count == 0 {
        return Err(FinderError::EmptyTrainingSet);
    }

    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        let month = rng.gen_range(1..=12);
        let temperature = rng.gen_range(TEMPERATURE_RANGE_C.0..=TEMPERATURE_RANGE_C.1);
        let current = rng.gen_range(CURRENT_RANGE.0..=CURRENT_RANGE.1);
        let chlorophyll = rng.gen_range(CHLOROPHYLL_RANGE.0..=CHLOROPHYLL_RANGE.1);
        let species = if species_aware {
            ALL_SPECIES.choose(rng).copied()
        } else {
            None
        };

        samples.push(Sample {
            observation: Observation {
                temperature,
                month,
                current,
                chlorophyll,
            },
            zone: label_zone(temperature, month, current),
            species,
        });
    }

    Ok(samples)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // --- Labeling rule ------------------------------------------------------

    #[test]
    fn test_warm_migration_season_with_positive_current_is_calangute() {
        assert_eq!(label_zone(30.0, 11, 0.5), Zone::Calangute);
        assert_eq!(label_zone(29.01, 10, 0.01), Zone::Calangute);
        assert_eq!(label_zone(31.9, 12, 1.0), Zone::Calangute);
    }

    #[test]
    fn test_cool_negative_current_is_colva() {
        assert_eq!(label_zone(27.5, 6, -0.3), Zone::Colva);
        assert_eq!(label_zone(26.0, 11, -1.0), Zone::Colva);
    }

    #[test]
    fn test_boundaries_are_strict() {
        // temperature == 29 is not "> 29"
        assert_eq!(label_zone(29.0, 11, 0.5), Zone::Baga);
        // current == 0 is neither "> 0" nor "< 0"
        assert_eq!(label_zone(30.0, 11, 0.0), Zone::Baga);
        assert_eq!(label_zone(27.0, 6, 0.0), Zone::Baga);
        // temperature == 28 is not "< 28"
        assert_eq!(label_zone(28.0, 6, -0.5), Zone::Baga);
    }

    #[test]
    fn test_warm_outside_migration_months_is_baga() {
        assert_eq!(label_zone(31.0, 9, 0.5), Zone::Baga);
        assert_eq!(label_zone(31.0, 1, 0.5), Zone::Baga);
    }

    #[test]
    fn test_migration_branch_takes_priority_order() {
        // Warm with negative current in season: branch 1 fails on current,
        // branch 2 fails on temperature, so it falls back.
        assert_eq!(label_zone(30.0, 11, -0.5), Zone::Baga);
    }

    // --- Generator ----------------------------------------------------------

    #[test]
    fn test_generate_zero_is_empty_training_set() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(generate(0, true, &mut rng), Err(FinderError::EmptyTrainingSet));
    }

    #[test]
    fn test_generate_returns_requested_count_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = generate(DEFAULT_SAMPLE_COUNT, false, &mut rng).expect("should generate");
        assert_eq!(samples.len(), 150);
        for s in &samples {
            let o = &s.observation;
            assert!((1..=12).contains(&o.month));
            assert!((26.0..=32.0).contains(&o.temperature));
            assert!((-1.0..=1.0).contains(&o.current));
            assert!((0.1..=0.5).contains(&o.chlorophyll));
            assert!(s.species.is_none());
        }
    }

    #[test]
    fn test_every_label_matches_the_rule() {
        let mut rng = StdRng::seed_from_u64(42);
        let samples = generate(2_000, true, &mut rng).expect("should generate");
        for s in &samples {
            assert_eq!(s.zone, label_observation(&s.observation), "mislabeled {:?}", s);
        }
    }

    #[test]
    fn test_species_aware_samples_carry_species() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples = generate(50, true, &mut rng).expect("should generate");
        assert!(samples.iter().all(|s| s.species.is_some()));
    }

    #[test]
    fn test_same_seed_reproduces_samples() {
        let a = generate(20, true, &mut StdRng::seed_from_u64(99)).unwrap();
        let b = generate(20, true, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_large_set_contains_every_zone() {
        let mut rng = StdRng::seed_from_u64(5);
        let samples = generate(1_000, false, &mut rng).unwrap();
        for zone in Zone::ALL {
            assert!(samples.iter().any(|s| s.zone == zone), "no samples labeled {}", zone);
        }
    }
}
