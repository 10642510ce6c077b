//! The mutable token pool.
//!
//! A [`Pool`] is built from a [`Composition`] by expanding each label into
//! `count` tokens. Labels are interned once into a shared, read-only table and
//! tokens are stored as indices into it, so cloning a pool copies only the
//! token vector.
//!
//! Draws sample without replacement: each pick chooses a uniformly random
//! index into the remaining tokens and `swap_remove`s it. Asking for at least
//! as many tokens as remain drains the pool without touching the RNG.

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use crate::composition::Composition;

#[derive(Clone, Debug)]
pub struct Pool {
    /// Sorted label table; token values index into it.
    labels: Arc<[String]>,
    /// Tokens at construction, used by [`Pool::reset`].
    initial: Arc<[usize]>,
    /// Remaining tokens.
    tokens: Vec<usize>,
}

impl Pool {
    /// Expand `composition` into one token per unit of count.
    ///
    /// Labels with a zero count still get a slot in the label table.
    pub fn new(composition: &Composition) -> Self {
        let labels: Arc<[String]> = composition
            .iter()
            .map(|(label, _)| label.to_string())
            .collect();
        let mut tokens = Vec::with_capacity(composition.total() as usize);
        for (id, (_, count)) in composition.iter().enumerate() {
            tokens.extend(std::iter::repeat(id).take(count as usize));
        }
        Self {
            labels,
            initial: tokens.clone().into(),
            tokens,
        }
    }

    /// Number of tokens remaining.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Label table, sorted. Token ids returned by [`Pool::draw_ids`] index it.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Id of `label` in the label table.
    pub fn label_id(&self, label: &str) -> Option<usize> {
        self.labels
            .binary_search_by(|l| l.as_str().cmp(label))
            .ok()
    }

    /// Remaining tokens of `label`.
    pub fn count(&self, label: &str) -> usize {
        match self.label_id(label) {
            Some(id) => self.tokens.iter().filter(|&&t| t == id).count(),
            None => 0,
        }
    }

    /// Remaining tokens per label, zero counts included.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        let mut per_id = vec![0usize; self.labels.len()];
        for &t in &self.tokens {
            per_id[t] += 1;
        }
        self.labels.iter().cloned().zip(per_id).collect()
    }

    /// Remaining tokens as labels, in storage order.
    pub fn contents(&self) -> Vec<String> {
        self.tokens.iter().map(|&t| self.labels[t].clone()).collect()
    }

    /// Copy of the pool whose [`Pool::reset`] point is its current contents.
    pub fn snapshot(&self) -> Pool {
        Pool {
            labels: Arc::clone(&self.labels),
            initial: self.tokens.clone().into(),
            tokens: self.tokens.clone(),
        }
    }

    /// Restore the pool to its construction-time contents.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.tokens.extend_from_slice(&self.initial);
    }

    /// Remove `n` tokens at random and return their labels.
    ///
    /// With `n >= len()` every remaining token is returned and the pool is
    /// left empty. `n == 0` returns nothing and leaves the pool unchanged.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Vec<String> {
        self.draw_ids(n, rng)
            .into_iter()
            .map(|id| self.labels[id].clone())
            .collect()
    }

    /// Same as [`Pool::draw`] but returns label ids.
    pub fn draw_ids<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Vec<usize> {
        if n >= self.tokens.len() {
            trace!(drained = self.tokens.len(), "draw drains pool");
            return std::mem::take(&mut self.tokens);
        }
        let mut drawn = Vec::with_capacity(n);
        for _ in 0..n {
            let idx = rng.random_range(0..self.tokens.len());
            drawn.push(self.tokens.swap_remove(idx));
        }
        drawn
    }

    /// Draw `n` tokens and add one to `tally[id]` per drawn token.
    ///
    /// `tally` must have at least `labels().len()` entries. Avoids allocating
    /// when `n` is below the pool size.
    #[inline]
    pub fn draw_into_tally<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R, tally: &mut [u64]) {
        if n >= self.tokens.len() {
            for t in self.tokens.drain(..) {
                tally[t] += 1;
            }
            return;
        }
        for _ in 0..n {
            let idx = rng.random_range(0..self.tokens.len());
            tally[self.tokens.swap_remove(idx)] += 1;
        }
    }
}
