//! End-to-end pipeline tests
//!
//! Exercise Generate → Fit → Predict → Score → Advise → Assemble through the
//! public API. Randomness is always seeded so every run is reproducible.

use fishfinder_service::alert::advisory;
use fishfinder_service::analysis::classifier::ZoneClassifier;
use fishfinder_service::analysis::synthetic::{self, label_observation};
use fishfinder_service::dev_mode::DevMode;
use fishfinder_service::model::{AdvisoryColor, FinderError, Observation};
use fishfinder_service::recommend::{PipelineSettings, recommend};
use fishfinder_service::verify::{VerificationStatus, default_probe, verify_classifier};
use fishfinder_service::zones::Zone;
use rand::SeedableRng;
use rand::rngs::StdRng;

// ---------------------------------------------------------------------------
// Classifier recovers the labeling rule
// ---------------------------------------------------------------------------

#[test]
fn warm_season_probe_predicts_calangute_in_at_least_90_percent_of_trials() {
    let probe = Observation::new(30.0, 11, 0.5, 0.4).unwrap();
    assert_eq!(label_observation(&probe), Zone::Calangute);

    let trials = 100;
    let mut agreed = 0;
    for trial in 0..trials {
        let mut rng = StdRng::seed_from_u64(1_000 + trial);
        let samples = synthetic::generate(150, true, &mut rng).unwrap();
        let mut clf = ZoneClassifier::new();
        clf.fit(&samples).unwrap();
        if clf.predict(&probe).unwrap() == Zone::Calangute {
            agreed += 1;
        }
    }

    assert!(
        agreed >= 90,
        "classifier predicted Calangute in only {}/{} trials",
        agreed,
        trials
    );
}

#[test]
fn verification_report_passes_for_default_probe() {
    let report = verify_classifier(&default_probe(), 100, 150, DevMode::new(Some(31))).unwrap();
    assert_ne!(report.status, VerificationStatus::Failed, "report: {:?}", report);
    assert!(report.agreement_rate >= 0.9);
}

// ---------------------------------------------------------------------------
// Reference observation
// ---------------------------------------------------------------------------

#[test]
fn cool_negative_current_observation_end_to_end() {
    let obs = Observation::new(27.5, 6, -0.3, 0.15).unwrap();
    assert_eq!(label_observation(&obs), Zone::Colva);

    let settings = PipelineSettings {
        sample_count: 3_000,
        include_species: true,
    };
    let rec = recommend(&obs, &settings, &mut StdRng::seed_from_u64(2025)).unwrap();

    assert_eq!(rec.zone, Zone::Colva);
    assert_eq!(rec.score, 30);
    assert_eq!(rec.color, AdvisoryColor::Red);
    assert!(rec.tip.contains("500 kg"), "tip: {}", rec.tip);
    assert_eq!(rec.temperature, 27.5);
    assert_eq!(rec.current, -0.3);
    assert_eq!(rec.chlorophyll, 0.15);
    assert!(rec.species.is_some());

    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["zone"], "Colva");
    assert_eq!(json["sst"], 27.5);
    assert_eq!(json["color"], "red");
}

#[test]
fn cool_negative_current_observation_at_default_sample_count_mostly_colva() {
    let obs = Observation::new(27.5, 6, -0.3, 0.15).unwrap();
    let settings = PipelineSettings::default();
    let colva = (0..100)
        .filter(|seed| {
            recommend(&obs, &settings, &mut StdRng::seed_from_u64(*seed))
                .map(|r| r.zone == Zone::Colva)
                .unwrap_or(false)
        })
        .count();
    assert!(colva >= 80, "Colva predicted in only {}/100 runs", colva);
}

// ---------------------------------------------------------------------------
// Scoring and error contract
// ---------------------------------------------------------------------------

#[test]
fn every_integer_score_has_one_advisory() {
    let mut reds = 0;
    let mut yellows = 0;
    let mut greens = 0;
    for s in 0..=100u8 {
        match advisory::advise(s).color {
            AdvisoryColor::Red => reds += 1,
            AdvisoryColor::Yellow => yellows += 1,
            AdvisoryColor::Green => greens += 1,
        }
    }
    assert_eq!((reds, yellows, greens), (50, 25, 26));
}

#[test]
fn generate_zero_and_predict_before_fit_fail() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        synthetic::generate(0, false, &mut rng),
        Err(FinderError::EmptyTrainingSet)
    );
    assert_eq!(
        ZoneClassifier::new().predict(&default_probe()),
        Err(FinderError::ClassifierNotFit)
    );
}

#[test]
fn generated_labels_match_rule_across_seeds() {
    for seed in 0..20 {
        let samples = synthetic::generate(150, true, &mut StdRng::seed_from_u64(seed)).unwrap();
        assert_eq!(samples.len(), 150);
        for s in &samples {
            assert_eq!(s.zone, label_observation(&s.observation));
        }
    }
}
