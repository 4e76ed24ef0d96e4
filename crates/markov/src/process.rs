//! Markov processes and lazy state trajectories.

use std::iter::FusedIterator;

use rand::RngCore;
use stochos_distribution::Distribution;
use tracing::trace;

use crate::error::MarkovError;

/// A discrete-time Markov process over states of type `S`.
///
/// Implementors supply [`MarkovProcess::transition`], the distribution of the
/// next state given the current one. It must depend only on `state` and the
/// process's fixed parameters.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use stochos_distribution::Categorical;
/// use stochos_markov::{MarkovError, MarkovProcess};
///
/// /// Switches between `true` and `false` with probability `p`.
/// struct FlipFlop {
///     p: f64,
/// }
///
/// impl MarkovProcess<bool> for FlipFlop {
///     type Transition<'a> = Categorical<bool>;
///
///     fn transition(&self, state: &bool) -> Result<Categorical<bool>, MarkovError> {
///         Ok(Categorical::new([(!*state, self.p), (*state, 1.0 - self.p)])?)
///     }
/// }
///
/// let process = FlipFlop { p: 0.5 };
/// let trace: Vec<bool> = process
///     .simulate(true, StdRng::seed_from_u64(1))
///     .take(10)
///     .collect::<Result<_, _>>()?;
/// assert_eq!(trace.len(), 10);
/// assert!(trace[0]);
/// # Ok::<(), MarkovError>(())
/// ```
pub trait MarkovProcess<S> {
    /// Distribution returned by [`MarkovProcess::transition`].
    type Transition<'a>: Distribution<S>
    where
        Self: 'a;

    /// Returns the distribution of the state following `state`.
    ///
    /// # Errors
    ///
    /// Processes with a closed state space return
    /// [`MarkovError::StateNotFound`] for a state outside it.
    fn transition(&self, state: &S) -> Result<Self::Transition<'_>, MarkovError>;

    /// Starts an unbounded trajectory from `start_state`.
    ///
    /// The trace first yields `start_state` itself, then one sampled state per
    /// pull. `rng` may be an owned generator or `&mut` to one. Every call
    /// returns an independent trace; the caller bounds its length.
    fn simulate<R: RngCore>(&self, start_state: S, rng: R) -> Trace<'_, Self, S, R>
    where
        Self: Sized,
    {
        Trace::new(self, start_state, rng)
    }
}

/// Lazy, unbounded trajectory of a [`MarkovProcess`], built by
/// [`MarkovProcess::simulate`].
///
/// Each call to `next` samples at most one transition. A failed transition
/// is yielded as `Err` in place of the state and ends the trace.
pub struct Trace<'a, P: ?Sized, S, R> {
    process: &'a P,
    state: Option<S>,
    started: bool,
    step: u64,
    rng: R,
}

impl<'a, P: ?Sized, S, R> Trace<'a, P, S, R> {
    fn new(process: &'a P, start_state: S, rng: R) -> Self {
        Self {
            process,
            state: Some(start_state),
            started: false,
            step: 0,
            rng,
        }
    }

    /// Number of transitions sampled so far.
    pub fn steps(&self) -> u64 {
        self.step
    }
}

impl<P, S, R> Iterator for Trace<'_, P, S, R>
where
    P: MarkovProcess<S> + ?Sized,
    S: Clone,
    R: RngCore,
{
    type Item = Result<S, MarkovError>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.as_ref()?;
        if !self.started {
            self.started = true;
            return Some(Ok(state.clone()));
        }
        let next = match self.process.transition(state) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(e) => {
                trace!(step = self.step, error = %e, "trace stopped");
                self.state = None;
                return Some(Err(e));
            }
        };
        self.step += 1;
        trace!(step = self.step, "sampled transition");
        self.state = Some(next.clone());
        Some(Ok(next))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            Some(_) => (usize::MAX, None),
            None => (0, Some(0)),
        }
    }
}

impl<P, S, R> FusedIterator for Trace<'_, P, S, R>
where
    P: MarkovProcess<S> + ?Sized,
    S: Clone,
    R: RngCore,
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use stochos_distribution::{Categorical, Constant};

    /// Deterministic counter: always moves to `state + 1`.
    struct Counter;

    impl MarkovProcess<u32> for Counter {
        type Transition<'a> = Constant<u32>;

        fn transition(&self, state: &u32) -> Result<Constant<u32>, MarkovError> {
            Ok(Constant::new(state + 1))
        }
    }

    /// Random walk on the integers that fails once it reaches `limit`.
    struct BoundedWalk {
        limit: i32,
    }

    impl MarkovProcess<i32> for BoundedWalk {
        type Transition<'a> = Categorical<i32>;

        fn transition(&self, state: &i32) -> Result<Categorical<i32>, MarkovError> {
            if state.abs() >= self.limit {
                return Err(MarkovError::StateNotFound {
                    state: state.to_string(),
                });
            }
            Ok(Categorical::new([(state - 1, 0.5), (state + 1, 0.5)])?)
        }
    }

    #[test]
    fn first_element_is_start_state() {
        let counter = Counter;
        let mut trace = counter.simulate(41, StdRng::seed_from_u64(0));
        assert_eq!(trace.next().unwrap().unwrap(), 41);
        assert_eq!(trace.steps(), 0);
    }

    #[test]
    fn counter_trace_in_order() {
        let trace: Vec<u32> = Counter
            .simulate(0, StdRng::seed_from_u64(0))
            .take(5)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(trace, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn samples_only_what_is_consumed() {
        let counter = Counter;
        let mut trace = counter.simulate(0, StdRng::seed_from_u64(0));
        for _ in 0..4 {
            trace.next();
        }
        assert_eq!(trace.steps(), 3);
    }

    #[test]
    fn borrowed_rng_is_advanced() {
        let mut rng = StdRng::seed_from_u64(9);
        let walk = BoundedWalk { limit: 1_000 };
        let first: Vec<i32> = walk
            .simulate(0, &mut rng)
            .take(20)
            .collect::<Result<_, _>>()
            .unwrap();
        let second: Vec<i32> = walk
            .simulate(0, &mut rng)
            .take(20)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(first[0], 0);
        assert_eq!(second[0], 0);
        for pair in first.windows(2) {
            assert_eq!((pair[1] - pair[0]).abs(), 1);
        }
    }

    #[test]
    fn same_seed_same_trace() {
        let walk = BoundedWalk { limit: 1_000 };
        let a: Vec<i32> = walk
            .simulate(0, StdRng::seed_from_u64(5))
            .take(200)
            .collect::<Result<_, _>>()
            .unwrap();
        let b: Vec<i32> = walk
            .simulate(0, StdRng::seed_from_u64(5))
            .take(200)
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn error_is_yielded_then_trace_ends() {
        let walk = BoundedWalk { limit: 2 };
        let mut trace = walk.simulate(2, StdRng::seed_from_u64(0));
        assert_eq!(trace.next().unwrap().unwrap(), 2);
        assert!(matches!(
            trace.next(),
            Some(Err(MarkovError::StateNotFound { .. }))
        ));
        assert!(trace.next().is_none());
        assert!(trace.next().is_none());
        assert_eq!(trace.size_hint(), (0, Some(0)));
    }
}
