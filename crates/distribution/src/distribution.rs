//! The sampling and enumeration capabilities shared by every distribution.

use std::marker::PhantomData;

use rand::RngCore;

use crate::finite::merge_outcomes;

/// A probability distribution over outcomes of type `T`.
///
/// The only required capability is drawing one outcome. Every call is an
/// independent draw whose only side effect is consuming entropy from `rng`.
///
/// The trait is object safe, so `Box<dyn Distribution<T>>` can stand in for
/// any concrete distribution.
pub trait Distribution<T> {
    /// Draws one outcome.
    fn sample(&self, rng: &mut dyn RngCore) -> T;

    /// Draws `n` independent outcomes.
    fn sample_n(&self, n: usize, rng: &mut dyn RngCore) -> Vec<T> {
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.sample(rng));
        }
        out
    }

    /// Returns the distribution of `f(x)` where `x` is drawn from `self`.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    /// use stochos_distribution::{Constant, Distribution};
    ///
    /// let doubled = Constant::new(21).map(|x| x * 2);
    /// let mut rng = StdRng::seed_from_u64(0);
    /// assert_eq!(doubled.sample(&mut rng), 42);
    /// ```
    fn map<U, F>(self, f: F) -> Mapped<Self, F, T>
    where
        Self: Sized,
        F: Fn(T) -> U,
    {
        Mapped {
            inner: self,
            f,
            _outcome: PhantomData,
        }
    }
}

/// A distribution whose outcomes and their probabilities can be enumerated.
pub trait FiniteDistribution<T>: Distribution<T> {
    /// Returns every outcome with its probability.
    fn outcomes(&self) -> Vec<(T, f64)>;

    /// Returns the probability mass of `outcome` (zero if it is not an outcome).
    fn probability(&self, outcome: &T) -> f64
    where
        T: PartialEq,
    {
        self.outcomes()
            .iter()
            .filter(|(x, _)| x == outcome)
            .map(|(_, p)| p)
            .sum()
    }

    /// Returns the exact expectation of `f` over the outcomes.
    fn expectation(&self, f: impl Fn(&T) -> f64) -> f64
    where
        Self: Sized,
    {
        self.outcomes().iter().map(|(x, p)| p * f(x)).sum()
    }
}

impl<T, D: Distribution<T> + ?Sized> Distribution<T> for &D {
    fn sample(&self, rng: &mut dyn RngCore) -> T {
        (**self).sample(rng)
    }
}

impl<T, D: Distribution<T> + ?Sized> Distribution<T> for Box<D> {
    fn sample(&self, rng: &mut dyn RngCore) -> T {
        (**self).sample(rng)
    }
}

impl<T, D: FiniteDistribution<T> + ?Sized> FiniteDistribution<T> for &D {
    fn outcomes(&self) -> Vec<(T, f64)> {
        (**self).outcomes()
    }
}

impl<T, D: FiniteDistribution<T> + ?Sized> FiniteDistribution<T> for Box<D> {
    fn outcomes(&self) -> Vec<(T, f64)> {
        (**self).outcomes()
    }
}

/// A distribution transformed by a function, built by [`Distribution::map`].
#[derive(Clone)]
pub struct Mapped<D, F, T> {
    inner: D,
    f: F,
    _outcome: PhantomData<fn() -> T>,
}

impl<D, F, T> Mapped<D, F, T> {
    /// Returns the untransformed distribution.
    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<T, U, D, F> Distribution<U> for Mapped<D, F, T>
where
    D: Distribution<T>,
    F: Fn(T) -> U,
{
    fn sample(&self, rng: &mut dyn RngCore) -> U {
        (self.f)(self.inner.sample(rng))
    }
}

/// Outcomes mapped to the same value have their probabilities summed.
impl<T, U, D, F> FiniteDistribution<U> for Mapped<D, F, T>
where
    D: FiniteDistribution<T>,
    F: Fn(T) -> U,
    U: PartialEq,
{
    fn outcomes(&self) -> Vec<(U, f64)> {
        merge_outcomes(
            self.inner
                .outcomes()
                .into_iter()
                .map(|(x, p)| ((self.f)(x), p)),
        )
    }
}
