//! Fish-finder advisory service.
//!
//! Recommends a Goa coastal fishing zone and a catch advisory from coarse
//! environmental signals (temperature, month, current, chlorophyll). Each
//! request generates a rule-labeled synthetic training set, fits a decision
//! tree to it, classifies the live observation, and scores chlorophyll into
//! a catch-limit tip and traffic-light color.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod dev_mode;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod recommend;
pub mod server;
pub mod verify;
pub mod zones;
