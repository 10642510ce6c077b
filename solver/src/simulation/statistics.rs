//! Aggregated experiment output.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// z for a two-sided 95% interval.
const Z_95: f64 = 1.959_963_984_540_054;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

/// Result of [`run_experiment`](super::engine::run_experiment).
#[derive(Clone, Debug, Serialize)]
pub struct ExperimentResult {
    pub trials: u64,
    pub successes: u64,
    /// `successes / trials`, always in [0, 1].
    pub probability: f64,
    /// Binomial standard error of `probability`.
    pub std_error: f64,
    /// Wilson score interval at 95%.
    pub confidence_95: Interval,
    pub draw_count: usize,
    /// Base seed the trials were derived from.
    pub seed: u64,
    /// Average number of tokens of each label drawn per trial.
    pub mean_drawn: BTreeMap<String, f64>,
    #[serde(serialize_with = "serialize_millis", rename = "elapsed_ms")]
    pub elapsed: Duration,
}

impl ExperimentResult {
    /// `trials` must be non-zero.
    pub(crate) fn new(
        successes: u64,
        trials: u64,
        draw_count: usize,
        seed: u64,
        drawn_totals: BTreeMap<String, u64>,
        elapsed: Duration,
    ) -> Self {
        let n = trials as f64;
        let probability = successes as f64 / n;
        let std_error = (probability * (1.0 - probability) / n).sqrt();
        let mean_drawn = drawn_totals
            .into_iter()
            .map(|(label, total)| (label, total as f64 / n))
            .collect();
        Self {
            trials,
            successes,
            probability,
            std_error,
            confidence_95: wilson_interval(successes, trials, Z_95),
            draw_count,
            seed,
            mean_drawn,
            elapsed,
        }
    }
}

/// Wilson score interval for `successes` out of `trials`, clamped to [0, 1].
pub fn wilson_interval(successes: u64, trials: u64, z: f64) -> Interval {
    if trials == 0 {
        return Interval {
            lower: 0.0,
            upper: 1.0,
        };
    }
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;
    let denom = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denom;
    let half = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denom;
    Interval {
        lower: (center - half).max(0.0),
        upper: (center + half).min(1.0),
    }
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1e3)
}
