//! Finite distributions: outcomes are enumerable with exact probabilities.

use std::fmt;

use rand::{Rng, RngCore};

use crate::distribution::{Distribution, FiniteDistribution};
use crate::error::DistributionError;

/// Default absolute tolerance when checking that probabilities sum to one.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Sums the probabilities of repeated outcomes, keeping first-seen order.
pub(crate) fn merge_outcomes<T: PartialEq>(
    pairs: impl IntoIterator<Item = (T, f64)>,
) -> Vec<(T, f64)> {
    let mut merged: Vec<(T, f64)> = Vec::new();
    for (x, p) in pairs {
        match merged.iter_mut().find(|(y, _)| *y == x) {
            Some((_, q)) => *q += p,
            None => merged.push((x, p)),
        }
    }
    merged
}

/// A distribution over a finite set of outcomes with explicit probabilities.
///
/// Sampling uses the inverse CDF: one uniform draw is located in the
/// cumulative probabilities with a binary search.
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    outcomes: Vec<(T, f64)>,
    cumulative: Vec<f64>,
}

impl<T: PartialEq> Categorical<T> {
    /// Builds a distribution from `(outcome, probability)` pairs.
    ///
    /// Repeated outcomes are merged by summing their probabilities. Each
    /// entry is checked on its own before merging.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError`] if there are no outcomes, a probability
    /// is non-finite or outside `[0, 1]`, or the probabilities do not sum to
    /// one within [`DEFAULT_TOLERANCE`].
    pub fn new(pairs: impl IntoIterator<Item = (T, f64)>) -> Result<Self, DistributionError> {
        Self::with_tolerance(pairs, DEFAULT_TOLERANCE)
    }

    /// Like [`Categorical::new`] with a caller-chosen sum tolerance.
    pub fn with_tolerance(
        pairs: impl IntoIterator<Item = (T, f64)>,
        tolerance: f64,
    ) -> Result<Self, DistributionError> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(DistributionError::InvalidParameter {
                name: "tolerance",
                reason: format!("must be finite and positive, got {tolerance}"),
            });
        }
        let pairs: Vec<(T, f64)> = pairs.into_iter().collect();
        if pairs.is_empty() {
            return Err(DistributionError::EmptyOutcomes);
        }
        let mut sum = 0.0;
        for &(_, p) in &pairs {
            if !p.is_finite() {
                return Err(DistributionError::NonFiniteProbability { value: p });
            }
            if p < 0.0 || p > 1.0 + tolerance {
                return Err(DistributionError::InvalidProbability { value: p });
            }
            sum += p;
        }
        let outcomes = merge_outcomes(pairs);
        if (sum - 1.0).abs() > tolerance {
            return Err(DistributionError::RowSum { sum, tolerance });
        }
        Ok(Self::from_valid(outcomes))
    }

    /// Builds a distribution from non-negative weights, normalising them to
    /// probabilities.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError`] if there are no outcomes, a weight is
    /// negative or non-finite, or all weights are zero.
    pub fn from_weights(
        pairs: impl IntoIterator<Item = (T, f64)>,
    ) -> Result<Self, DistributionError> {
        let pairs: Vec<(T, f64)> = pairs.into_iter().collect();
        if pairs.is_empty() {
            return Err(DistributionError::EmptyOutcomes);
        }
        let mut total = 0.0;
        for &(_, w) in &pairs {
            if !w.is_finite() {
                return Err(DistributionError::NonFiniteProbability { value: w });
            }
            if w < 0.0 {
                return Err(DistributionError::InvalidParameter {
                    name: "weight",
                    reason: format!("must be non-negative, got {w}"),
                });
            }
            total += w;
        }
        if total <= 0.0 {
            return Err(DistributionError::ZeroTotalWeight);
        }
        let mut outcomes = merge_outcomes(pairs);
        for (_, w) in outcomes.iter_mut() {
            *w /= total;
        }
        Ok(Self::from_valid(outcomes))
    }
}

impl<T> Categorical<T> {
    fn from_valid(outcomes: Vec<(T, f64)>) -> Self {
        let mut acc = 0.0;
        let cumulative = outcomes
            .iter()
            .map(|&(_, p)| {
                acc += p;
                acc
            })
            .collect();
        Self {
            outcomes,
            cumulative,
        }
    }

    /// Iterates over outcomes and their probabilities.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.outcomes.iter().map(|(x, p)| (x, *p))
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Always false: construction rejects an empty outcome set.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn sample_ref(&self, rng: &mut dyn RngCore) -> &T {
        let u: f64 = rng.random();
        let idx = self.cumulative.partition_point(|&c| c <= u);
        if idx < self.outcomes.len() {
            return &self.outcomes[idx].0;
        }
        // Rounding left the total slightly below u: take the last outcome
        // that carries any mass.
        let last = self
            .outcomes
            .iter()
            .rposition(|&(_, p)| p > 0.0)
            .unwrap_or(self.outcomes.len() - 1);
        &self.outcomes[last].0
    }
}

impl<T: Clone> Distribution<T> for Categorical<T> {
    fn sample(&self, rng: &mut dyn RngCore) -> T {
        self.sample_ref(rng).clone()
    }
}

impl<T: Clone> FiniteDistribution<T> for Categorical<T> {
    fn outcomes(&self) -> Vec<(T, f64)> {
        self.outcomes.clone()
    }
}

impl<T: fmt::Debug> fmt::Display for Categorical<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (x, p)) in self.outcomes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x:?}: {p:.3}")?;
        }
        f.write_str("}")
    }
}

/// A coin flip: `true` with probability `p`.
#[derive(Debug, Clone, Copy)]
pub struct Bernoulli {
    p: f64,
}

impl Bernoulli {
    /// Creates a Bernoulli distribution.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError`] if `p` is non-finite or outside `[0, 1]`.
    pub fn new(p: f64) -> Result<Self, DistributionError> {
        if !p.is_finite() {
            return Err(DistributionError::NonFiniteProbability { value: p });
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(DistributionError::InvalidProbability { value: p });
        }
        Ok(Self { p })
    }

    /// Probability of `true`.
    pub fn p(&self) -> f64 {
        self.p
    }
}

impl Distribution<bool> for Bernoulli {
    fn sample(&self, rng: &mut dyn RngCore) -> bool {
        let u: f64 = rng.random();
        u < self.p
    }
}

impl FiniteDistribution<bool> for Bernoulli {
    fn outcomes(&self) -> Vec<(bool, f64)> {
        vec![(true, self.p), (false, 1.0 - self.p)]
    }
}

/// A degenerate distribution that always yields the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant<T> {
    value: T,
}

impl<T> Constant<T> {
    /// Creates a distribution concentrated on `value`.
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// The only outcome.
    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> Distribution<T> for Constant<T> {
    fn sample(&self, _rng: &mut dyn RngCore) -> T {
        self.value.clone()
    }
}

impl<T: Clone> FiniteDistribution<T> for Constant<T> {
    fn outcomes(&self) -> Vec<(T, f64)> {
        vec![(self.value.clone(), 1.0)]
    }
}

/// Uniform choice among a non-empty list of options.
#[derive(Debug, Clone)]
pub struct Choose<T> {
    options: Vec<T>,
}

impl<T> Choose<T> {
    /// Creates a uniform choice over `options`.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::EmptyOutcomes`] if `options` is empty.
    pub fn new(options: impl IntoIterator<Item = T>) -> Result<Self, DistributionError> {
        let options: Vec<T> = options.into_iter().collect();
        if options.is_empty() {
            return Err(DistributionError::EmptyOutcomes);
        }
        Ok(Self { options })
    }

    /// The options, in the order given.
    pub fn options(&self) -> &[T] {
        &self.options
    }
}

impl<T: Clone> Distribution<T> for Choose<T> {
    fn sample(&self, rng: &mut dyn RngCore) -> T {
        let i = rng.random_range(0..self.options.len());
        self.options[i].clone()
    }
}

impl<T: Clone + PartialEq> FiniteDistribution<T> for Choose<T> {
    fn outcomes(&self) -> Vec<(T, f64)> {
        let p = 1.0 / self.options.len() as f64;
        merge_outcomes(self.options.iter().map(|x| (x.clone(), p)))
    }
}
