//! Zone prediction for the fish-finder service.
//!
//! Submodules:
//! - `synthetic` — rule-labeled training-set generation.
//! - `classifier` — decision tree over the four observation features, fit
//!   fresh on each request.

pub mod classifier;
pub mod synthetic;
