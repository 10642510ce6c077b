//! Label → count mappings.
//!
//! [`Composition`] is the immutable description of what a pool holds before
//! any draw. [`Criterion`](crate::criterion::Criterion) reuses the same
//! validation for its minimum counts, so both share [`parse_counts`] and
//! [`validate_counts`].

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Validated mapping from label to token count.
///
/// Labels are kept in sorted order, which fixes the expansion order used by
/// [`Pool::new`](crate::pool::Pool::new).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Composition {
    counts: BTreeMap<String, u64>,
}

impl Composition {
    /// Build from `(label, count)` pairs. Negative counts, empty labels and
    /// repeated labels are rejected. Zero counts are kept.
    pub fn from_counts<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        Ok(Self {
            counts: validate_counts(pairs)?,
        })
    }

    /// Number of tokens of `label` (0 if absent).
    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Total number of tokens.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Iterate `(label, count)` in label order, zero counts included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(l, &c)| (l.as_str(), c))
    }

    pub fn as_map(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }
}

impl FromStr for Composition {
    type Err = Error;

    /// Parse `"red=3,green=2"` (commas and/or whitespace separate entries).
    fn from_str(s: &str) -> Result<Self> {
        Self::from_counts(parse_counts(s)?)
    }
}

/// Shared validation for compositions and criteria.
pub(crate) fn validate_counts<I, S>(pairs: I) -> Result<BTreeMap<String, u64>>
where
    I: IntoIterator<Item = (S, i64)>,
    S: Into<String>,
{
    let mut counts = BTreeMap::new();
    for (label, count) in pairs {
        let label: String = label.into();
        if label.is_empty() {
            return Err(Error::EmptyLabel);
        }
        let value = u64::try_from(count).map_err(|_| Error::InvalidCount {
            label: label.clone(),
            count,
        })?;
        if counts.contains_key(&label) {
            return Err(Error::DuplicateLabel(label));
        }
        counts.insert(label, value);
    }
    Ok(counts)
}

/// Split `label=count` entries separated by commas or whitespace.
pub(crate) fn parse_counts(s: &str) -> Result<Vec<(String, i64)>> {
    s.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (label, count) = entry
                .split_once('=')
                .ok_or_else(|| Error::Parse(format!("expected label=count, got '{}'", entry)))?;
            let count: i64 = count
                .trim()
                .parse()
                .map_err(|_| Error::Parse(format!("invalid count in '{}'", entry)))?;
            Ok((label.trim().to_string(), count))
        })
        .collect()
}
