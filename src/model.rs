//! Core data types for the fish-finder advisory service.
//!
//! This module defines the shared domain model imported by all other modules.
//! It contains no I/O, only types, their validation, and the error enum.

use serde::Serialize;
use thiserror::Error;

use crate::zones::{Species, Zone};

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// The four-feature input vector driving both training-label generation and
/// live prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Sea surface temperature, °C.
    pub temperature: f64,
    /// Calendar month, 1..=12.
    pub month: u32,
    /// Normalized current, nominally in [-1, 1]. Negative is a cool current.
    pub current: f64,
    /// Chlorophyll concentration, nominally in [0.1, 0.5].
    pub chlorophyll: f64,
}

impl Observation {
    /// Builds an observation, rejecting out-of-range months and non-finite
    /// feature values.
    pub fn new(
        temperature: f64,
        month: u32,
        current: f64,
        chlorophyll: f64,
    ) -> Result<Self, FinderError> {
        if !(1..=12).contains(&month) {
            return Err(FinderError::InvalidInput(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        for (name, value) in [
            ("temperature", temperature),
            ("current", current),
            ("chlorophyll", chlorophyll),
        ] {
            if !value.is_finite() {
                return Err(FinderError::InvalidInput(format!(
                    "{} must be a finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(Self {
            temperature,
            month,
            current,
            chlorophyll,
        })
    }

    /// Feature vector in the column order the classifier is trained on:
    /// `[temperature, month, current, chlorophyll]`.
    pub fn features(&self) -> [f64; 4] {
        [
            self.temperature,
            f64::from(self.month),
            self.current,
            self.chlorophyll,
        ]
    }
}

// ---------------------------------------------------------------------------
// Training samples
// ---------------------------------------------------------------------------

/// A rule-labeled synthetic training example. Only produced by
/// `analysis::synthetic::generate`, and discarded at the end of the request.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub observation: Observation,
    pub zone: Zone,
    pub species: Option<Species>,
}

// ---------------------------------------------------------------------------
// Advisory output
// ---------------------------------------------------------------------------

/// Traffic-light color attached to a catch advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryColor {
    Red,
    Yellow,
    Green,
}

impl std::fmt::Display for AdvisoryColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdvisoryColor::Red => write!(f, "red"),
            AdvisoryColor::Yellow => write!(f, "yellow"),
            AdvisoryColor::Green => write!(f, "green"),
        }
    }
}

/// The structured response record for one request.
///
/// Serialized field names match what the frontend reads: the temperature goes
/// out as `sst`, and `species` is omitted entirely when not picked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub zone: Zone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<Species>,
    #[serde(rename = "sst")]
    pub temperature: f64,
    pub current: f64,
    pub chlorophyll: f64,
    pub score: u8,
    pub tip: String,
    pub color: AdvisoryColor,
}

/// Zone sentinel returned on the error path in place of a real zone name.
pub const ERROR_ZONE: &str = "Error";

/// Error-path counterpart of `Recommendation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecommendation {
    pub zone: &'static str,
    pub tip: String,
}

impl ErrorRecommendation {
    pub fn from_message(message: impl std::fmt::Display) -> Self {
        Self {
            zone: ERROR_ZONE,
            tip: format!("Failed to find fish. {}", message),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors surfaced by the prediction pipeline.
///
/// A failed temperature fetch is not represented here: the ingest layer
/// substitutes a fallback temperature before the pipeline ever runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinderError {
    /// A missing, non-numeric, or out-of-range observation field.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The generator was asked for zero samples, or the classifier was fit on none.
    #[error("Training set is empty")]
    EmptyTrainingSet,
    /// `predict` was called before a successful `fit`.
    #[error("Classifier has not been fit")]
    ClassifierNotFit,
    /// The tree learner rejected the training set.
    #[error("Training failed: {0}")]
    TrainingFailed(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
