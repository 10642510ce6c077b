//! Experiment engine — draws from a fresh copy of the base pool N times.
//!
//! Every trial starts from the base pool's contents as they were when the
//! experiment began. Trial `i` seeds its own `SmallRng` with
//! `seed.wrapping_add(i)`, so a seeded run gives the same result whether it
//! runs sequentially or on the rayon pool.
//!
//! In parallel mode each rayon worker owns one working pool and one tally
//! buffer and resets them before every trial; partial sums are reduced at the
//! end.

use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::criterion::{Criterion, ResolvedCriterion};
use crate::error::{Error, Result};
use crate::pool::Pool;

use super::statistics::ExperimentResult;

/// Parameters of one experiment.
#[derive(Clone, Debug)]
pub struct ExperimentConfig {
    /// Tokens drawn per trial.
    pub draw_count: usize,
    /// Number of trials. Must be at least 1.
    pub trials: u64,
    /// Base seed. `None` draws one from the thread RNG.
    pub seed: Option<u64>,
    /// Spread trials over the rayon pool.
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            draw_count: 1,
            trials: 1000,
            seed: None,
            parallel: true,
        }
    }
}

/// Success count and per-label drawn totals over a set of trials.
#[derive(Clone)]
struct Totals {
    successes: u64,
    drawn: Vec<u64>,
}

impl Totals {
    fn zero(num_labels: usize) -> Self {
        Self {
            successes: 0,
            drawn: vec![0; num_labels],
        }
    }

    fn merge(mut self, other: Totals) -> Self {
        self.successes += other.successes;
        for (a, b) in self.drawn.iter_mut().zip(other.drawn) {
            *a += b;
        }
        self
    }
}

/// Per-worker scratch state.
struct Worker<'a> {
    pool: Pool,
    tally: Vec<u64>,
    totals: Totals,
    criterion: &'a ResolvedCriterion,
}

impl<'a> Worker<'a> {
    fn new(base: &Pool, criterion: &'a ResolvedCriterion) -> Self {
        let num_labels = base.labels().len();
        Self {
            pool: base.clone(),
            tally: vec![0; num_labels],
            totals: Totals::zero(num_labels),
            criterion,
        }
    }

    #[inline]
    fn run_trial(&mut self, trial: u64, seed: u64, draw_count: usize) {
        self.pool.reset();
        self.tally.fill(0);
        let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(trial));
        self.pool
            .draw_into_tally(draw_count, &mut rng, &mut self.tally);
        if self.criterion.is_met(&self.tally) {
            self.totals.successes += 1;
        }
        for (total, &n) in self.totals.drawn.iter_mut().zip(&self.tally) {
            *total += n;
        }
    }
}

/// Run one trial the direct way: clone, draw, tally, check.
pub fn simulate_trial<R: Rng + ?Sized>(
    pool: &Pool,
    criterion: &Criterion,
    draw_count: usize,
    rng: &mut R,
) -> bool {
    let mut working = pool.clone();
    let drawn = working.draw(draw_count, rng);
    criterion.is_met_by_labels(&drawn)
}

/// Run `config.trials` trials of drawing `config.draw_count` tokens from
/// copies of `pool` and report how often `criterion` was met.
///
/// `pool` is not modified. Fails with [`Error::ZeroTrials`] before doing any
/// work if `config.trials` is 0.
pub fn run_experiment(
    pool: &Pool,
    criterion: &Criterion,
    config: &ExperimentConfig,
) -> Result<ExperimentResult> {
    if config.trials == 0 {
        return Err(Error::ZeroTrials);
    }
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let base = pool.snapshot();
    let resolved = criterion.resolve(&base);
    let num_labels = base.labels().len();

    debug!(
        trials = config.trials,
        draw_count = config.draw_count,
        pool_size = base.len(),
        seed,
        parallel = config.parallel,
        "starting experiment"
    );
    let start = Instant::now();

    let totals = if config.parallel {
        (0..config.trials)
            .into_par_iter()
            .fold(
                || Worker::new(&base, &resolved),
                |mut worker, trial| {
                    worker.run_trial(trial, seed, config.draw_count);
                    worker
                },
            )
            .map(|worker| worker.totals)
            .reduce(|| Totals::zero(num_labels), Totals::merge)
    } else {
        let mut worker = Worker::new(&base, &resolved);
        for trial in 0..config.trials {
            worker.run_trial(trial, seed, config.draw_count);
        }
        worker.totals
    };

    let elapsed = start.elapsed();
    debug!(
        successes = totals.successes,
        trials = config.trials,
        elapsed_ms = elapsed.as_secs_f64() * 1e3,
        "experiment finished"
    );

    Ok(ExperimentResult::new(
        totals.successes,
        config.trials,
        config.draw_count,
        seed,
        base.labels()
            .iter()
            .cloned()
            .zip(totals.drawn)
            .collect(),
        elapsed,
    ))
}

/// Estimated probability that `draw_count` tokens drawn from `pool` meet
/// `criterion`, over `trials` trials with an unseeded RNG.
pub fn probability(
    pool: &Pool,
    criterion: &Criterion,
    draw_count: usize,
    trials: u64,
) -> Result<f64> {
    let config = ExperimentConfig {
        draw_count,
        trials,
        ..ExperimentConfig::default()
    };
    run_experiment(pool, criterion, &config).map(|r| r.probability)
}
