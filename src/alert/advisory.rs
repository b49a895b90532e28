//! Catch advisory scoring.
//!
//! Chlorophyll is the only abundance proxy: it maps to a 0–100 score, and the
//! score maps to a catch-limit tip and a traffic-light color. Bracket lower
//! bounds are inclusive:
//!   score < 50        → red,    500 kg limit
//!   50 <= score < 75  → yellow, 750 kg target
//!   score >= 75       → green,  up to 1000 kg

use crate::model::AdvisoryColor;

/// Lowest score in the yellow bracket.
pub const YELLOW_MIN_SCORE: u8 = 50;
/// Lowest score in the green bracket.
pub const GREEN_MIN_SCORE: u8 = 75;

/// Catch caps quoted by each bracket's tip, in kilograms.
pub const RED_CATCH_LIMIT_KG: u32 = 500;
pub const YELLOW_CATCH_TARGET_KG: u32 = 750;
pub const GREEN_CATCH_MAX_KG: u32 = 1000;

fn tip_for(color: AdvisoryColor) -> String {
    match color {
        AdvisoryColor::Red => format!("Limit catch to {} kg to preserve stocks.", RED_CATCH_LIMIT_KG),
        AdvisoryColor::Yellow => {
            format!("Sustainable fishing OK—target {} kg max.", YELLOW_CATCH_TARGET_KG)
        }
        AdvisoryColor::Green => format!("High abundance—fish freely, max {} kg.", GREEN_CATCH_MAX_KG),
    }
}

/// Tip and color for one score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub tip: String,
    pub color: AdvisoryColor,
}

/// Abundance score: `floor(chlorophyll * 200)` clamped to `[0, 100]`.
pub fn score(chlorophyll: f64) -> u8 {
    if chlorophyll.is_nan() {
        return 0;
    }
    (chlorophyll * 200.0).floor().clamp(0.0, 100.0) as u8
}

/// Maps a score to its catch advisory. Scores above 100 are treated as green.
pub fn advise(score: u8) -> Advisory {
    let color = if score < YELLOW_MIN_SCORE {
        AdvisoryColor::Red
    } else if score < GREEN_MIN_SCORE {
        AdvisoryColor::Yellow
    } else {
        AdvisoryColor::Green
    };
    Advisory {
        tip: tip_for(color),
        color,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
