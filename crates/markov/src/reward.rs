//! Markov reward processes and lazy reward trajectories.

use std::iter::FusedIterator;

use rand::RngCore;
use stochos_distribution::{Distribution, Mapped};
use tracing::trace;

use crate::error::MarkovError;
use crate::process::MarkovProcess;

/// A Markov process whose transitions also yield a real-valued reward.
///
/// Implementors supply [`MarkovRewardProcess::transition_reward`], the joint
/// distribution of the next state and the reward earned on the way there.
/// Like [`MarkovProcess::transition`] it must be a pure function of `state`.
pub trait MarkovRewardProcess<S> {
    /// Distribution returned by [`MarkovRewardProcess::transition_reward`].
    type RewardTransition<'a>: Distribution<(S, f64)>
    where
        Self: 'a;

    /// Returns the joint distribution of `(next_state, reward)` from `state`.
    ///
    /// # Errors
    ///
    /// Processes with a closed state space return
    /// [`MarkovError::StateNotFound`] for a state outside it.
    fn transition_reward(&self, state: &S) -> Result<Self::RewardTransition<'_>, MarkovError>;

    /// Starts an unbounded reward trajectory from `start_state`.
    ///
    /// Yields one `(next_state, reward)` pair per transition, starting with
    /// the first transition out of `start_state`. The start state itself is
    /// never paired with a reward.
    fn simulate_reward<R: RngCore>(&self, start_state: S, rng: R) -> RewardTrace<'_, Self, S, R>
    where
        Self: Sized,
    {
        RewardTrace {
            process: self,
            state: Some(start_state),
            step: 0,
            rng,
        }
    }

    /// Views this process as a plain [`MarkovProcess`] by dropping rewards.
    ///
    /// Fed the same random source, the view's trajectory after its start
    /// state matches the states of [`MarkovRewardProcess::simulate_reward`].
    fn states_only(&self) -> StatesOnly<'_, Self>
    where
        Self: Sized,
    {
        StatesOnly { process: self }
    }
}

/// Lazy, unbounded trajectory of a [`MarkovRewardProcess`], built by
/// [`MarkovRewardProcess::simulate_reward`].
pub struct RewardTrace<'a, P: ?Sized, S, R> {
    process: &'a P,
    state: Option<S>,
    step: u64,
    rng: R,
}

impl<P: ?Sized, S, R> RewardTrace<'_, P, S, R> {
    /// Number of transitions sampled so far.
    pub fn steps(&self) -> u64 {
        self.step
    }
}

impl<P, S, R> Iterator for RewardTrace<'_, P, S, R>
where
    P: MarkovRewardProcess<S> + ?Sized,
    S: Clone,
    R: RngCore,
{
    type Item = Result<(S, f64), MarkovError>;

    fn next(&mut self) -> Option<Self::Item> {
        let state = self.state.as_ref()?;
        let (next, reward) = match self.process.transition_reward(state) {
            Ok(dist) => dist.sample(&mut self.rng),
            Err(e) => {
                trace!(step = self.step, error = %e, "reward trace stopped");
                self.state = None;
                return Some(Err(e));
            }
        };
        self.step += 1;
        trace!(step = self.step, reward, "sampled reward transition");
        self.state = Some(next.clone());
        Some(Ok((next, reward)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            Some(_) => (usize::MAX, None),
            None => (0, Some(0)),
        }
    }
}

impl<P, S, R> FusedIterator for RewardTrace<'_, P, S, R>
where
    P: MarkovRewardProcess<S> + ?Sized,
    S: Clone,
    R: RngCore,
{
}

/// A reward process seen as a plain Markov process, built by
/// [`MarkovRewardProcess::states_only`].
pub struct StatesOnly<'p, P: ?Sized> {
    process: &'p P,
}

impl<P: ?Sized> Clone for StatesOnly<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: ?Sized> Copy for StatesOnly<'_, P> {}

/// Projection applied by [`StatesOnly`] to every transition.
pub type DropReward<S> = fn((S, f64)) -> S;

fn drop_reward<S>((state, _reward): (S, f64)) -> S {
    state
}

impl<S, P> MarkovProcess<S> for StatesOnly<'_, P>
where
    P: MarkovRewardProcess<S> + ?Sized,
{
    type Transition<'a>
        = Mapped<P::RewardTransition<'a>, DropReward<S>, (S, f64)>
    where
        Self: 'a;

    fn transition(&self, state: &S) -> Result<Self::Transition<'_>, MarkovError> {
        let joint = self.process.transition_reward(state)?;
        Ok(joint.map(drop_reward as DropReward<S>))
    }
}
