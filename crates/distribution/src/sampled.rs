//! Distributions defined only by a sampling function.

use rand::RngCore;

use crate::distribution::Distribution;

/// Number of draws used by [`SampledDistribution::expectation`] by default.
pub const DEFAULT_EXPECTATION_SAMPLES: usize = 10_000;

/// A distribution with no closed form, defined by a function that draws one
/// outcome.
///
/// The sampler receives an explicit context value instead of capturing the
/// surrounding state, so a process can hand the current state to the sampler
/// by value.
///
/// # Example
///
/// ```
/// use rand::{Rng, RngCore, SeedableRng};
/// use rand::rngs::StdRng;
/// use stochos_distribution::{Distribution, SampledDistribution};
///
/// // A fair die offset by the context.
/// let die = SampledDistribution::new(10u32, |offset: &u32, rng: &mut dyn RngCore| {
///     offset + rng.random_range(1..=6)
/// });
/// let mut rng = StdRng::seed_from_u64(0);
/// let roll = die.sample(&mut rng);
/// assert!((11..=16).contains(&roll));
/// ```
#[derive(Clone)]
pub struct SampledDistribution<C, F> {
    context: C,
    sampler: F,
    expectation_samples: usize,
}

impl<C, F> SampledDistribution<C, F> {
    /// Wraps `sampler`, which will be called with `context` on every draw.
    pub fn new<T>(context: C, sampler: F) -> Self
    where
        F: Fn(&C, &mut dyn RngCore) -> T,
    {
        Self {
            context,
            sampler,
            expectation_samples: DEFAULT_EXPECTATION_SAMPLES,
        }
    }

    /// Sets the number of draws used to estimate expectations.
    pub fn with_expectation_samples(mut self, n: usize) -> Self {
        self.expectation_samples = n.max(1);
        self
    }

    /// Returns the context handed to the sampler.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// Returns the number of draws used to estimate expectations.
    pub fn expectation_samples(&self) -> usize {
        self.expectation_samples
    }

    /// Estimates the expectation of `f` by averaging over fresh draws.
    pub fn expectation<T>(&self, f: impl Fn(&T) -> f64, rng: &mut dyn RngCore) -> f64
    where
        F: Fn(&C, &mut dyn RngCore) -> T,
    {
        let n = self.expectation_samples;
        let total: f64 = (0..n)
            .map(|_| f(&(self.sampler)(&self.context, &mut *rng)))
            .sum();
        total / n as f64
    }
}

impl<T, C, F> Distribution<T> for SampledDistribution<C, F>
where
    F: Fn(&C, &mut dyn RngCore) -> T,
{
    fn sample(&self, rng: &mut dyn RngCore) -> T {
        (self.sampler)(&self.context, rng)
    }
}
