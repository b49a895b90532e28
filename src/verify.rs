//! Classifier Verification Module
//!
//! Checks that a classifier fit on a freshly generated sample set recovers
//! the labeling rule. Each trial generates its own samples, fits its own
//! classifier, and predicts one probe observation, exactly as a request
//! would. The report records how often the prediction agreed with the rule.
//!
//! Run from the command line with `fishfinder_service --verify`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analysis::classifier::ZoneClassifier;
use crate::analysis::synthetic::{generate, label_observation};
use crate::dev_mode::DevMode;
use crate::logging;
use crate::model::{FinderError, Observation};

/// Agreement rate below which a verification run is reported as failed.
pub const MIN_AGREEMENT: f64 = 0.9;

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub probe: ProbeObservation,
    pub expected_zone: String,
    pub trials: usize,
    pub sample_count: usize,
    pub seed: Option<u64>,
    pub agreed: usize,
    pub agreement_rate: f64,
    /// Prediction counts keyed by zone name
    pub predictions: BTreeMap<String, usize>,
    pub status: VerificationStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProbeObservation {
    pub temperature: f64,
    pub month: u32,
    pub current: f64,
    pub chlorophyll: f64,
}

impl From<&Observation> for ProbeObservation {
    fn from(o: &Observation) -> Self {
        Self {
            temperature: o.temperature,
            month: o.month,
            current: o.current,
            chlorophyll: o.chlorophyll,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    Success,
    PartialSuccess,
    Failed,
}

// ============================================================================
// Verification
// ============================================================================

/// The reference probe: warm, in season, positive current.
pub fn default_probe() -> Observation {
    Observation {
        temperature: 30.0,
        month: 11,
        current: 0.5,
        chlorophyll: 0.4,
    }
}

pub fn verify_classifier(
    probe: &Observation,
    trials: usize,
    sample_count: usize,
    dev_mode: DevMode,
) -> Result<VerificationReport, FinderError> {
    let expected = label_observation(probe);
    let mut predictions: BTreeMap<String, usize> = BTreeMap::new();
    let mut agreed = 0;

    for trial in 0..trials {
        let mut rng = dev_mode.rng_for(trial as u64);
        let samples = generate(sample_count, false, &mut rng)?;
        let mut classifier = ZoneClassifier::new();
        classifier.fit(&samples)?;
        let zone = classifier.predict(probe)?;

        *predictions.entry(zone.name().to_string()).or_insert(0) += 1;
        if zone == expected {
            agreed += 1;
        }
    }

    let agreement_rate = if trials == 0 {
        0.0
    } else {
        agreed as f64 / trials as f64
    };
    let status = if trials > 0 && agreed == trials {
        VerificationStatus::Success
    } else if agreement_rate >= MIN_AGREEMENT {
        VerificationStatus::PartialSuccess
    } else {
        VerificationStatus::Failed
    };

    logging::log_verification_summary(trials, agreed, MIN_AGREEMENT);

    Ok(VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        probe: ProbeObservation::from(probe),
        expected_zone: expected.name().to_string(),
        trials,
        sample_count,
        seed: dev_mode.seed,
        agreed,
        agreement_rate,
        predictions,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_trials_is_failed() {
        let report = verify_classifier(&default_probe(), 0, 150, DevMode::new(Some(1))).unwrap();
        assert_eq!(report.status, VerificationStatus::Failed);
        assert_eq!(report.agreement_rate, 0.0);
        assert!(report.predictions.is_empty());
    }

    #[test]
    fn test_zero_sample_count_propagates_error() {
        let result = verify_classifier(&default_probe(), 3, 0, DevMode::new(Some(1)));
        assert!(matches!(result, Err(FinderError::EmptyTrainingSet)));
    }

    #[test]
    fn test_prediction_counts_add_up_to_trials() {
        let report = verify_classifier(&default_probe(), 25, 150, DevMode::new(Some(3))).unwrap();
        assert_eq!(report.predictions.values().sum::<usize>(), 25);
        assert_eq!(report.expected_zone, "Calangute");
        assert_eq!(report.seed, Some(3));
    }

    #[test]
    fn test_seeded_runs_reproduce() {
        let a = verify_classifier(&default_probe(), 10, 150, DevMode::new(Some(5))).unwrap();
        let b = verify_classifier(&default_probe(), 10, 150, DevMode::new(Some(5))).unwrap();
        assert_eq!(a.agreed, b.agreed);
        assert_eq!(a.predictions, b.predictions);
    }

    #[test]
    fn test_report_serializes() {
        let report = verify_classifier(&default_probe(), 2, 50, DevMode::new(Some(8))).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["probe"]["month"], 11);
        assert_eq!(json["trials"], 2);
    }
}
