//! Recommendation pipeline: Generate → Fit → Predict → Score → Advise → Assemble.
//!
//! Nothing here survives a call. Each invocation generates its own samples
//! and fits its own classifier, so concurrent requests share no state.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::alert::advisory::{self, Advisory};
use crate::analysis::classifier::ZoneClassifier;
use crate::analysis::synthetic::{self, CHLOROPHYLL_RANGE, CURRENT_RANGE, DEFAULT_SAMPLE_COUNT};
use crate::logging::{self, Source};
use crate::model::{FinderError, Observation, Recommendation};
use crate::zones::{ALL_SPECIES, Species, Zone};

/// Per-request pipeline knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub sample_count: usize,
    /// Attach a randomly picked species to the recommendation.
    pub include_species: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_SAMPLE_COUNT,
            include_species: true,
        }
    }
}

/// Rounds through the exact decimal expansion, so ties go to the even
/// digit: 28.25 → 28.2, 0.125 → 0.12.
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Draws the live current and chlorophyll values, which are not measured.
pub fn sample_conditions<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    let current = rng.gen_range(CURRENT_RANGE.0..=CURRENT_RANGE.1);
    let chlorophyll = rng.gen_range(CHLOROPHYLL_RANGE.0..=CHLOROPHYLL_RANGE.1);
    (current, chlorophyll)
}

/// Combines the stage outputs into the response record, rounding the
/// presented features (temperature to 1 dp, current and chlorophyll to 2 dp).
pub fn assemble(
    observation: &Observation,
    zone: Zone,
    score: u8,
    advisory: Advisory,
    species: Option<Species>,
) -> Recommendation {
    Recommendation {
        zone,
        species,
        temperature: round_to(observation.temperature, 1),
        current: round_to(observation.current, 2),
        chlorophyll: round_to(observation.chlorophyll, 2),
        score,
        tip: advisory.tip,
        color: advisory.color,
    }
}

/// Runs the full pipeline for one observation.
pub fn recommend<R: Rng + ?Sized>(
    observation: &Observation,
    settings: &PipelineSettings,
    rng: &mut R,
) -> Result<Recommendation, FinderError> {
    let samples = synthetic::generate(settings.sample_count, settings.include_species, rng)?;

    let mut classifier = ZoneClassifier::new();
    classifier.fit(&samples)?;
    let zone = classifier.predict(observation)?;

    logging::debug(
        Source::Model,
        Some(zone.name()),
        &format!(
            "fit {} samples (depth {}, {} leaves)",
            samples.len(),
            classifier.depth().unwrap_or(0),
            classifier.leaf_count().unwrap_or(0)
        ),
    );

    let score = advisory::score(observation.chlorophyll);
    let advice = advisory::advise(score);
    let species = if settings.include_species {
        ALL_SPECIES.choose(rng).copied()
    } else {
        None
    };

    Ok(assemble(observation, zone, score, advice, species))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
