//! Repeated-trial experiments.
//!
//! - [`engine`]: run N independent trials against a base pool
//! - [`statistics`]: the aggregated [`ExperimentResult`]

pub mod engine;
pub mod statistics;

pub use engine::{probability, run_experiment, simulate_trial, ExperimentConfig};
pub use statistics::{ExperimentResult, Interval};
