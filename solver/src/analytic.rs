//! Exact success probabilities from the multivariate hypergeometric
//! distribution.
//!
//! Used to check that simulated estimates converge. Labels outside the
//! criterion are lumped into one "other" class, so the cost depends only on
//! the labels the criterion constrains.

use crate::composition::Composition;
use crate::criterion::Criterion;

/// Probability that `draw_count` tokens drawn without replacement from a pool
/// of `composition` meet `criterion`.
///
/// `draw_count` above the pool size is treated as drawing the whole pool.
pub fn exact_probability(composition: &Composition, criterion: &Criterion, draw_count: u64) -> f64 {
    let total = composition.total();
    let n = draw_count.min(total);

    // (available, minimum) per constrained label
    let mut classes = Vec::new();
    let mut constrained = 0u64;
    for (label, min) in criterion.iter() {
        if min == 0 {
            continue;
        }
        let available = composition.count(label);
        if available < min {
            return 0.0;
        }
        constrained += available;
        classes.push((available, min));
    }
    if classes.is_empty() {
        return 1.0;
    }
    let other = total - constrained;
    let ln_total = ln_binomial(total, n);

    let mut p = 0.0;
    sum_terms(&classes, n, other, 0.0, ln_total, &mut p);
    p.clamp(0.0, 1.0)
}

/// Add the mass of every tally of `classes` that meets its minimums, given
/// `remaining` draws left and `ln_acc` accumulated so far.
fn sum_terms(
    classes: &[(u64, u64)],
    remaining: u64,
    other: u64,
    ln_acc: f64,
    ln_total: f64,
    p: &mut f64,
) {
    match classes.split_first() {
        None => {
            if remaining <= other {
                *p += (ln_acc + ln_binomial(other, remaining) - ln_total).exp();
            }
        }
        Some((&(available, min), rest)) => {
            let hi = available.min(remaining);
            for k in min..=hi {
                sum_terms(
                    rest,
                    remaining - k,
                    other,
                    ln_acc + ln_binomial(available, k),
                    ln_total,
                    p,
                );
            }
        }
    }
}

/// ln C(n, k). Requires `k <= n`.
fn ln_binomial(n: u64, k: u64) -> f64 {
    let k = k.min(n - k);
    (1..=k)
        .map(|i| ((n - k + i) as f64 / i as f64).ln())
        .sum()
}
