//! Success criteria: per-label minimum counts a single draw must reach.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use crate::composition::{parse_counts, validate_counts};
use crate::error::{Error, Result};
use crate::pool::Pool;

/// Mapping from label to the minimum number of that label a trial must draw.
///
/// Labels not mentioned impose no constraint. An empty criterion is met by
/// every draw.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Criterion {
    minimums: BTreeMap<String, u64>,
}

impl Criterion {
    /// Build from `(label, minimum)` pairs. Validation matches
    /// [`Composition::from_counts`](crate::composition::Composition::from_counts).
    pub fn from_counts<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Ok(Self {
            minimums: validate_counts(pairs)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.minimums.is_empty()
    }

    pub fn minimum(&self, label: &str) -> u64 {
        self.minimums.get(label).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.minimums.iter().map(|(l, &m)| (l.as_str(), m))
    }

    /// Check a tally keyed by label.
    pub fn is_met_by(&self, drawn: &BTreeMap<String, u64>) -> bool {
        self.minimums
            .iter()
            .all(|(label, &min)| drawn.get(label).copied().unwrap_or(0) >= min)
    }

    /// Check a sequence of drawn labels.
    pub fn is_met_by_labels<S: AsRef<str>>(&self, drawn: &[S]) -> bool {
        let mut tally: BTreeMap<String, u64> = BTreeMap::new();
        for label in drawn {
            *tally.entry(label.as_ref().to_string()).or_insert(0) += 1;
        }
        self.is_met_by(&tally)
    }

    /// Bind the criterion to `pool`'s label table for per-trial evaluation.
    pub fn resolve(&self, pool: &Pool) -> ResolvedCriterion {
        let mut requirements = Vec::new();
        let mut satisfiable = true;
        for (label, &min) in &self.minimums {
            if min == 0 {
                continue;
            }
            match pool.label_id(label) {
                Some(id) => requirements.push((id, min)),
                None => satisfiable = false,
            }
        }
        ResolvedCriterion {
            requirements,
            satisfiable,
        }
    }
}

impl FromStr for Criterion {
    type Err = Error;

    /// Parse `"red=2,green=1"`.
    fn from_str(s: &str) -> Result<Self> {
        Self::from_counts(parse_counts(s)?)
    }
}

/// A criterion checked against label-id tallies.
#[derive(Clone, Debug)]
pub struct ResolvedCriterion {
    /// `(label id, minimum)` for every positive minimum.
    requirements: Vec<(usize, u64)>,
    /// False if a positive minimum names a label the pool never held.
    satisfiable: bool,
}

impl ResolvedCriterion {
    #[inline]
    pub fn is_met(&self, tally: &[u64]) -> bool {
        self.satisfiable
            && self
                .requirements
                .iter()
                .all(|&(id, min)| tally[id] >= min)
    }

    pub fn is_satisfiable(&self) -> bool {
        self.satisfiable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composition;

    fn pool(pairs: &[(&str, i64)]) -> Pool {
        Pool::new(&Composition::from_counts(pairs.iter().copied()).unwrap())
    }

    #[test]
    fn test_empty_criterion_always_met() {
        let c = Criterion::default();
        assert!(c.is_met_by_labels::<&str>(&[]));
        assert!(c.resolve(&pool(&[])).is_met(&[]));
    }

    #[test]
    fn test_is_met_by_labels() {
        let c = Criterion::from_counts([("red", 2), ("green", 1)]).unwrap();
        assert!(c.is_met_by_labels(&["red", "green", "red", "black"]));
        assert!(!c.is_met_by_labels(&["red", "green", "black"]));
        assert!(!c.is_met_by_labels(&["red", "red"]));
    }

    #[test]
    fn test_resolve_against_pool() {
        let p = pool(&[("black", 6), ("green", 3), ("red", 4)]);
        let c = Criterion::from_counts([("red", 2), ("green", 1)]).unwrap();
        let r = c.resolve(&p);
        // label ids: black=0, green=1, red=2
        assert!(r.is_met(&[0, 1, 2]));
        assert!(!r.is_met(&[3, 0, 2]));
        assert!(!r.is_met(&[0, 1, 1]));
    }

    #[test]
    fn test_unknown_label_unsatisfiable() {
        let p = pool(&[("red", 3)]);
        let c = Criterion::from_counts([("blue", 1)]).unwrap();
        let r = c.resolve(&p);
        assert!(!r.is_satisfiable());
        assert!(!r.is_met(&[3]));
    }

    #[test]
    fn test_zero_minimum_ignored() {
        let p = pool(&[("red", 3)]);
        let c = Criterion::from_counts([("blue", 0), ("red", 0)]).unwrap();
        let r = c.resolve(&p);
        assert!(r.is_satisfiable());
        assert!(r.is_met(&[0]));
    }

    #[test]
    fn test_negative_minimum_rejected() {
        assert!(matches!(
            "red=-1".parse::<Criterion>(),
            Err(Error::InvalidCount { .. })
        ));
    }
}
