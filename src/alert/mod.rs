//! Catch advisories derived from the abundance score.
//!
//! Submodules:
//! - `advisory` — chlorophyll score and the red/yellow/green catch brackets.

pub mod advisory;
