//! Scenario tests for the experiment runner against known probabilities.

use hatdraw::{
    exact_probability, probability, run_experiment, Composition, Criterion, Error,
    ExperimentConfig, Pool,
};

fn comp(counts: &str) -> Composition {
    counts.parse().unwrap()
}

fn crit(counts: &str) -> Criterion {
    counts.parse().unwrap()
}

fn config(draw_count: usize, trials: u64, seed: u64) -> ExperimentConfig {
    ExperimentConfig {
        draw_count,
        trials,
        seed: Some(seed),
        parallel: true,
    }
}

// ── Concrete scenarios ───────────────────────────────────────────────

#[test]
fn single_red_from_three_of_five() {
    let pool = Pool::new(&comp("red=3,green=2"));
    let r = run_experiment(&pool, &crit("red=1"), &config(1, 1000, 42)).unwrap();
    assert!((r.probability - 0.6).abs() < 0.05, "p={}", r.probability);
}

#[test]
fn two_colors_in_one_draw_impossible() {
    let pool = Pool::new(&comp("red=3,green=2"));
    let p = probability(&pool, &crit("red=1,green=1"), 1, 1000).unwrap();
    assert_eq!(p, 0.0);
}

#[test]
fn hat_example_converges() {
    let c = comp("black=6,red=4,green=3");
    let criterion = crit("red=2,green=1");
    let pool = Pool::new(&c);
    let r = run_experiment(&pool, &criterion, &config(5, 20_000, 7)).unwrap();
    let exact = exact_probability(&c, &criterion, 5);
    assert!((exact - 0.366).abs() < 0.001, "exact={exact}");
    assert!((r.probability - exact).abs() < 0.02, "p={} exact={}", r.probability, exact);
}

// ── Edge cases ───────────────────────────────────────────────────────

#[test]
fn empty_criterion_is_certain() {
    let pool = Pool::new(&comp("red=3,green=2"));
    for draws in [0, 1, 5, 50] {
        let p = probability(&pool, &Criterion::default(), draws, 100).unwrap();
        assert_eq!(p, 1.0, "draws={draws}");
    }
}

#[test]
fn zero_draws_never_meets_nontrivial_criterion() {
    let pool = Pool::new(&comp("red=3,green=2"));
    let p = probability(&pool, &crit("red=1"), 0, 500).unwrap();
    assert_eq!(p, 0.0);
}

#[test]
fn empty_pool() {
    let pool = Pool::new(&Composition::default());
    assert_eq!(probability(&pool, &crit("red=1"), 3, 100).unwrap(), 0.0);
    assert_eq!(probability(&pool, &Criterion::default(), 3, 100).unwrap(), 1.0);
}

#[test]
fn full_drain_is_deterministic() {
    let pool = Pool::new(&comp("red=3,green=2"));
    assert_eq!(probability(&pool, &crit("red=3,green=2"), 5, 100).unwrap(), 1.0);
    assert_eq!(probability(&pool, &crit("red=4"), 9, 100).unwrap(), 0.0);
}

#[test]
fn zero_trials_is_an_error() {
    let pool = Pool::new(&comp("red=3,green=2"));
    let err = run_experiment(&pool, &crit("red=1"), &config(1, 0, 1)).unwrap_err();
    assert!(matches!(err, Error::ZeroTrials));
}

#[test]
fn negative_counts_are_errors() {
    assert!(matches!(
        Composition::from_counts([("red", -3)]),
        Err(Error::InvalidCount { .. })
    ));
    assert!(matches!(
        Criterion::from_counts([("red", -1)]),
        Err(Error::InvalidCount { .. })
    ));
}

// ── Statistical properties ───────────────────────────────────────────

#[test]
fn stricter_criterion_is_no_more_likely() {
    // Same seed means the same draws, so the stricter success set is a subset.
    let pool = Pool::new(&comp("black=6,red=4,green=3"));
    let lax = run_experiment(&pool, &crit("red=1,green=1"), &config(5, 10_000, 3)).unwrap();
    let mid = run_experiment(&pool, &crit("red=2,green=1"), &config(5, 10_000, 3)).unwrap();
    let strict = run_experiment(&pool, &crit("red=3,green=2"), &config(5, 10_000, 3)).unwrap();
    assert!(lax.successes >= mid.successes);
    assert!(mid.successes >= strict.successes);
}

#[test]
fn seeded_runs_are_reproducible() {
    let pool = Pool::new(&comp("black=6,red=4,green=3"));
    let criterion = crit("red=2,green=1");
    let a = run_experiment(&pool, &criterion, &config(5, 3000, 11)).unwrap();
    let mut seq = config(5, 3000, 11);
    seq.parallel = false;
    let b = run_experiment(&pool, &criterion, &seq).unwrap();
    assert_eq!(a.successes, b.successes);
    assert_eq!(a.seed, 11);
}

#[test]
fn confidence_interval_covers_exact() {
    let c = comp("a=5,b=5,c=10");
    let criterion = crit("a=1,b=1");
    let r = run_experiment(&Pool::new(&c), &criterion, &config(4, 20_000, 99)).unwrap();
    let exact = exact_probability(&c, &criterion, 4);
    // 4-sigma band so a fixed seed cannot land just outside a 95% interval
    assert!(
        (r.probability - exact).abs() < 4.0 * r.std_error.max(1e-3),
        "p={} exact={} se={}",
        r.probability,
        exact,
        r.std_error
    );
}
