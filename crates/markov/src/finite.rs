//! Finite Markov processes backed by explicit transition tables.

use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;

use stochos_distribution::{Categorical, FiniteDistribution};
use tracing::warn;

use crate::config::MarkovConfig;
use crate::error::MarkovError;
use crate::process::MarkovProcess;
use crate::reward::MarkovRewardProcess;
use crate::table::TransitionTable;

/// A Markov process over a finite state space known in full up front.
///
/// Each source state maps to an explicit distribution over next states.
/// Looking up a state outside the table is an error, never an absorbing
/// state.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use stochos_markov::{FiniteMarkovProcess, MarkovProcess};
///
/// let p = 0.25;
/// let flip_flop = FiniteMarkovProcess::new(
///     [true, false].map(|b| (b, [(!b, p), (b, 1.0 - p)])),
/// )
/// .unwrap();
///
/// let from_true: Vec<(bool, f64)> = flip_flop
///     .successors(&true)
///     .unwrap()
///     .map(|(s, p)| (*s, p))
///     .collect();
/// assert_eq!(from_true, vec![(false, 0.25), (true, 0.75)]);
///
/// let trace: Vec<bool> = flip_flop
///     .simulate(true, StdRng::seed_from_u64(0))
///     .take(5)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(trace.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct FiniteMarkovProcess<S> {
    table: TransitionTable<S, S>,
}

impl<S> FiniteMarkovProcess<S>
where
    S: Clone + Eq + Hash + Debug,
{
    /// Builds a process from `state -> [(next_state, probability)]` rows.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError`] if the table is empty, a source state repeats,
    /// or a row has a negative probability or does not sum to one.
    pub fn new<I, J>(table: I) -> Result<Self, MarkovError>
    where
        I: IntoIterator<Item = (S, J)>,
        J: IntoIterator<Item = (S, f64)>,
    {
        Self::with_config(table, &MarkovConfig::new())
    }

    /// Like [`FiniteMarkovProcess::new`], using the tolerance from `config`.
    pub fn with_config<I, J>(table: I, config: &MarkovConfig) -> Result<Self, MarkovError>
    where
        I: IntoIterator<Item = (S, J)>,
        J: IntoIterator<Item = (S, f64)>,
    {
        config.validate()?;
        let table = TransitionTable::new(table, config.tolerance())?;
        for (from, row) in table.iter() {
            for (to, p) in row.iter() {
                if p > 0.0 && !table.contains(to) {
                    warn!(from = ?from, to = ?to, "successor state has no transition row");
                }
            }
        }
        Ok(Self { table })
    }

    /// States reachable in one step from `state`, with their probabilities.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::StateNotFound`] if `state` is not in the table.
    pub fn successors(&self, state: &S) -> Result<impl Iterator<Item = (&S, f64)>, MarkovError> {
        Ok(self.table.get(state)?.iter())
    }
}

impl<S> FiniteMarkovProcess<S> {
    /// Source states, in the order they were given.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.table.states()
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false: construction rejects an empty table.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The validated transition table.
    pub fn table(&self) -> &TransitionTable<S, S> {
        &self.table
    }
}

impl<S> MarkovProcess<S> for FiniteMarkovProcess<S>
where
    S: Clone + Eq + Hash + Debug,
{
    type Transition<'a>
        = &'a Categorical<S>
    where
        Self: 'a;

    fn transition(&self, state: &S) -> Result<&Categorical<S>, MarkovError> {
        self.table.get(state)
    }
}

impl<S: Debug> fmt::Display for FiniteMarkovProcess<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, row) in self.table.iter() {
            writeln!(f, "From State {from:?}:")?;
            for (to, p) in row.iter() {
                writeln!(f, "  To State {to:?} with Probability {p:.3}")?;
            }
        }
        Ok(())
    }
}

/// A Markov reward process over a finite state space known in full up front.
///
/// Each source state maps to an explicit distribution over
/// `(next_state, reward)` pairs.
#[derive(Debug, Clone)]
pub struct FiniteMarkovRewardProcess<S> {
    table: TransitionTable<S, (S, f64)>,
    tolerance: f64,
}

impl<S> FiniteMarkovRewardProcess<S>
where
    S: Clone + Eq + Hash + Debug,
{
    /// Builds a process from `state -> [((next_state, reward), probability)]`
    /// rows.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError`] if the table is empty, a source state repeats,
    /// or a row has a negative probability or does not sum to one.
    pub fn new<I, J>(table: I) -> Result<Self, MarkovError>
    where
        I: IntoIterator<Item = (S, J)>,
        J: IntoIterator<Item = ((S, f64), f64)>,
    {
        Self::with_config(table, &MarkovConfig::new())
    }

    /// Like [`FiniteMarkovRewardProcess::new`], using the tolerance from
    /// `config`.
    pub fn with_config<I, J>(table: I, config: &MarkovConfig) -> Result<Self, MarkovError>
    where
        I: IntoIterator<Item = (S, J)>,
        J: IntoIterator<Item = ((S, f64), f64)>,
    {
        config.validate()?;
        let table = TransitionTable::new(table, config.tolerance())?;
        for (from, row) in table.iter() {
            for ((to, _), p) in row.iter() {
                if p > 0.0 && !table.contains(to) {
                    warn!(from = ?from, to = ?to, "successor state has no transition row");
                }
            }
        }
        Ok(Self {
            table,
            tolerance: config.tolerance(),
        })
    }

    /// Exact expected reward of one transition out of `state`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::StateNotFound`] if `state` is not in the table.
    pub fn expected_reward(&self, state: &S) -> Result<f64, MarkovError> {
        Ok(self.table.get(state)?.expectation(|&(_, r)| r))
    }

    /// The finite Markov process obtained by summing out rewards.
    pub fn to_markov_process(&self) -> Result<FiniteMarkovProcess<S>, MarkovError> {
        let rows = self.table.iter().map(|(from, row)| {
            let next: Vec<(S, f64)> = row.iter().map(|((to, _), p)| (to.clone(), p)).collect();
            (from.clone(), next)
        });
        let table = TransitionTable::new(rows, self.tolerance)?;
        Ok(FiniteMarkovProcess { table })
    }
}

impl<S> FiniteMarkovRewardProcess<S> {
    /// Source states, in the order they were given.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.table.states()
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always false: construction rejects an empty table.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The validated transition table.
    pub fn table(&self) -> &TransitionTable<S, (S, f64)> {
        &self.table
    }
}

impl<S> MarkovRewardProcess<S> for FiniteMarkovRewardProcess<S>
where
    S: Clone + Eq + Hash + Debug,
{
    type RewardTransition<'a>
        = &'a Categorical<(S, f64)>
    where
        Self: 'a;

    fn transition_reward(&self, state: &S) -> Result<&Categorical<(S, f64)>, MarkovError> {
        self.table.get(state)
    }
}

impl<S: Debug> fmt::Display for FiniteMarkovRewardProcess<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, row) in self.table.iter() {
            writeln!(f, "From State {from:?}:")?;
            for ((to, reward), p) in row.iter() {
                writeln!(
                    f,
                    "  To [State {to:?} and Reward {reward:.3}] with Probability {p:.3}"
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stochos_distribution::{Distribution, DistributionError};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    fn three_state() -> FiniteMarkovProcess<char> {
        FiniteMarkovProcess::new([
            ('a', vec![('a', 0.5), ('b', 0.3), ('c', 0.2)]),
            ('b', vec![('a', 0.1), ('b', 0.7), ('c', 0.2)]),
            ('c', vec![('a', 0.2), ('b', 0.3), ('c', 0.5)]),
        ])
        .unwrap()
    }

    #[test]
    fn builds_from_hash_map() {
        let table: HashMap<u8, HashMap<u8, f64>> = HashMap::from([
            (0, HashMap::from([(0, 0.25), (1, 0.75)])),
            (1, HashMap::from([(0, 1.0)])),
        ]);
        let mp = FiniteMarkovProcess::new(table).unwrap();
        assert_eq!(mp.len(), 2);
        let mut states: Vec<u8> = mp.states().copied().collect();
        states.sort();
        assert_eq!(states, vec![0, 1]);
    }

    #[test]
    fn rejects_empty_table() {
        let r = FiniteMarkovProcess::new(Vec::<(u8, Vec<(u8, f64)>)>::new());
        assert!(matches!(r, Err(MarkovError::EmptyTable)));
    }

    #[test]
    fn rejects_negative_probability() {
        let r = FiniteMarkovProcess::new([(0, vec![(0, 1.5), (1, -0.5)]), (1, vec![(1, 1.0)])]);
        assert!(matches!(
            r,
            Err(MarkovError::InvalidRow {
                source: DistributionError::InvalidProbability { .. },
                ..
            })
        ));
    }

    #[test]
    fn rejects_negative_entry_for_repeated_successor() {
        let r = FiniteMarkovProcess::new([
            (0u8, vec![(0u8, -0.5), (0, 1.0), (1, 0.5)]),
            (1, vec![(1, 1.0)]),
        ]);
        assert!(matches!(
            r,
            Err(MarkovError::InvalidRow {
                source: DistributionError::InvalidProbability { .. },
                ..
            })
        ));

        let r = FiniteMarkovRewardProcess::new([
            (0u8, vec![((0u8, 1.0), -0.5), ((0, 1.0), 1.5)]),
            (1, vec![((1, 0.0), 1.0)]),
        ]);
        assert!(matches!(
            r,
            Err(MarkovError::InvalidRow {
                source: DistributionError::InvalidProbability { .. },
                ..
            })
        ));
    }

    #[test]
    fn rejects_row_not_summing_to_one() {
        let r = FiniteMarkovProcess::new([(0, vec![(0, 0.6), (1, 0.6)]), (1, vec![(1, 1.0)])]);
        assert!(matches!(
            r,
            Err(MarkovError::InvalidRow { state, source: DistributionError::RowSum { .. } })
                if state == "0"
        ));
    }

    #[test]
    fn config_tolerance_applies() {
        let rows = [(0, vec![(0, 0.5), (1, 0.4999)]), (1, vec![(1, 1.0)])];
        assert!(FiniteMarkovProcess::new(rows.clone()).is_err());
        let loose = MarkovConfig::new().with_tolerance(1e-3);
        assert!(FiniteMarkovProcess::with_config(rows, &loose).is_ok());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad = MarkovConfig::new().with_tolerance(0.5);
        let r = FiniteMarkovProcess::with_config([(0, vec![(0, 1.0)])], &bad);
        assert!(matches!(r, Err(MarkovError::InvalidTolerance { .. })));
    }

    #[test]
    fn transition_unknown_state_fails() {
        let mp = three_state();
        assert!(matches!(
            mp.transition(&'z'),
            Err(MarkovError::StateNotFound { state }) if state == "'z'"
        ));
        assert!(mp.successors(&'z').is_err());
    }

    #[test]
    fn successors_expose_exact_probabilities() {
        let mp = three_state();
        let succ: Vec<(char, f64)> = mp.successors(&'b').unwrap().map(|(s, p)| (*s, p)).collect();
        assert_eq!(succ, vec![('a', 0.1), ('b', 0.7), ('c', 0.2)]);
        assert_abs_diff_eq!(
            mp.transition(&'a').unwrap().probability(&'c'),
            0.2,
            epsilon = 1e-12
        );
    }

    #[test]
    fn transition_frequencies_match_table() {
        let mp = three_state();
        let dist = mp.transition(&'a').unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let n = 10_000;
        let mut counts: HashMap<char, usize> = HashMap::new();
        for _ in 0..n {
            *counts.entry(dist.sample(&mut rng)).or_default() += 1;
        }
        for (s, p) in [('a', 0.5), ('b', 0.3), ('c', 0.2)] {
            let f = counts.get(&s).copied().unwrap_or(0) as f64 / n as f64;
            assert!((f - p).abs() < 0.03, "{s}: frequency {f}, expected ~{p}");
        }
    }

    #[test]
    fn trace_fails_on_dangling_successor() {
        let mp = FiniteMarkovProcess::new([("start", vec![("gone", 1.0)])]).unwrap();
        let items: Vec<Result<&str, MarkovError>> =
            mp.simulate("start", StdRng::seed_from_u64(0)).take(5).collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_ref().unwrap(), &"start");
        assert_eq!(items[1].as_ref().unwrap(), &"gone");
        assert!(matches!(items[2], Err(MarkovError::StateNotFound { .. })));
    }

    #[test]
    fn display_lists_rows() {
        let mp = FiniteMarkovProcess::new([(1, vec![(2, 1.0)]), (2, vec![(1, 0.5), (2, 0.5)])])
            .unwrap();
        assert_eq!(
            mp.to_string(),
            "From State 1:\n  To State 2 with Probability 1.000\n\
             From State 2:\n  To State 1 with Probability 0.500\n  To State 2 with Probability 0.500\n"
        );
    }

    fn reward_flip_flop(p: f64) -> FiniteMarkovRewardProcess<bool> {
        FiniteMarkovRewardProcess::new([
            (true, vec![((false, 1.0), p), ((true, 0.5), 1.0 - p)]),
            (false, vec![((true, 0.5), p), ((false, 0.5), 1.0 - p)]),
        ])
        .unwrap()
    }

    #[test]
    fn expected_reward_is_exact() {
        let mrp = reward_flip_flop(0.25);
        assert_abs_diff_eq!(
            mrp.expected_reward(&true).unwrap(),
            0.25 * 1.0 + 0.75 * 0.5,
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(mrp.expected_reward(&false).unwrap(), 0.5, epsilon = 1e-12);
        assert!(mrp.expected_reward(&true).is_ok());
    }

    #[test]
    fn reward_process_marginalises() {
        let mrp = FiniteMarkovRewardProcess::new([
            ('x', vec![(('y', 1.0), 0.2), (('y', 3.0), 0.3), (('x', 0.0), 0.5)]),
            ('y', vec![(('x', 2.0), 1.0)]),
        ])
        .unwrap();
        let mp = mrp.to_markov_process().unwrap();
        let succ: Vec<(char, f64)> = mp.successors(&'x').unwrap().map(|(s, p)| (*s, p)).collect();
        assert_eq!(succ.len(), 2);
        assert_abs_diff_eq!(succ[0].1, 0.5, epsilon = 1e-12);
        assert_eq!(succ[0].0, 'y');
        assert_eq!(succ[1], ('x', 0.5));
    }

    /// Counts `WARN` events seen while installed.
    struct CountWarnings(Arc<AtomicUsize>);

    impl<T: tracing::Subscriber> Layer<T> for CountWarnings {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, T>) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn marginalising_does_not_repeat_dangling_warnings() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountWarnings(warnings.clone()));
        tracing::subscriber::with_default(subscriber, || {
            let mrp = FiniteMarkovRewardProcess::new([
                ("home", vec![(("home", 0.0), 0.5), (("away", 1.0), 0.5)]),
            ])
            .unwrap();
            assert_eq!(warnings.load(Ordering::SeqCst), 1);

            let mp = mrp.to_markov_process().unwrap();
            assert_eq!(mp.len(), 1);
            assert_eq!(warnings.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn reward_transition_unknown_state_fails() {
        let mrp = reward_flip_flop(0.5);
        let missing = FiniteMarkovRewardProcess::new([(1u8, vec![((1u8, 0.0), 1.0)])]).unwrap();
        assert!(mrp.transition_reward(&true).is_ok());
        assert!(matches!(
            missing.transition_reward(&2),
            Err(MarkovError::StateNotFound { .. })
        ));
    }

    #[test]
    fn reward_display() {
        let mrp = FiniteMarkovRewardProcess::new([(0, vec![((0, 1.5), 1.0)])]).unwrap();
        assert_eq!(
            mrp.to_string(),
            "From State 0:\n  To [State 0 and Reward 1.500] with Probability 1.000\n"
        );
    }
}
