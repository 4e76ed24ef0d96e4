//! Validated state-indexed tables of finite distributions.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use stochos_distribution::Categorical;
use tracing::debug;

use crate::error::MarkovError;

/// One finite distribution per source state, in insertion order.
///
/// Backs both finite process kinds: rows range over next states for a
/// [`FiniteMarkovProcess`](crate::FiniteMarkovProcess) and over
/// `(next_state, reward)` pairs for a
/// [`FiniteMarkovRewardProcess`](crate::FiniteMarkovRewardProcess).
#[derive(Debug, Clone)]
pub struct TransitionTable<S, T> {
    rows: Vec<(S, Categorical<T>)>,
    index: HashMap<S, usize>,
}

impl<S, T> TransitionTable<S, T>
where
    S: Clone + Eq + Hash + Debug,
    T: PartialEq,
{
    /// Validates every row and indexes the table by source state.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::EmptyTable`] for an empty table,
    /// [`MarkovError::DuplicateState`] if a source state repeats, and
    /// [`MarkovError::InvalidRow`] if a row has a negative probability or
    /// does not sum to one within `tolerance`.
    #[tracing::instrument(skip(table))]
    pub fn new<I, J>(table: I, tolerance: f64) -> Result<Self, MarkovError>
    where
        I: IntoIterator<Item = (S, J)>,
        J: IntoIterator<Item = (T, f64)>,
    {
        let mut rows = Vec::new();
        let mut index = HashMap::new();
        for (state, row) in table {
            if index.contains_key(&state) {
                return Err(MarkovError::DuplicateState {
                    state: format!("{state:?}"),
                });
            }
            let dist = Categorical::with_tolerance(row, tolerance).map_err(|source| {
                MarkovError::InvalidRow {
                    state: format!("{state:?}"),
                    source,
                }
            })?;
            index.insert(state.clone(), rows.len());
            rows.push((state, dist));
        }
        if rows.is_empty() {
            return Err(MarkovError::EmptyTable);
        }
        debug!(n_states = rows.len(), "transition table built");
        Ok(Self { rows, index })
    }

    /// Returns the row for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::StateNotFound`] if `state` has no row.
    pub fn get(&self, state: &S) -> Result<&Categorical<T>, MarkovError> {
        self.index
            .get(state)
            .map(|&i| &self.rows[i].1)
            .ok_or_else(|| MarkovError::StateNotFound {
                state: format!("{state:?}"),
            })
    }

    /// Returns true if `state` has a row.
    pub fn contains(&self, state: &S) -> bool {
        self.index.contains_key(state)
    }
}

impl<S, T> TransitionTable<S, T> {
    /// Source states, in the order they were given.
    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.rows.iter().map(|(s, _)| s)
    }

    /// Source states with their rows, in the order they were given.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &Categorical<T>)> {
        self.rows.iter().map(|(s, d)| (s, d))
    }

    /// Number of source states.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false: construction rejects an empty table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stochos_distribution::{DistributionError, FiniteDistribution};

    #[test]
    fn builds_and_looks_up() {
        let t = TransitionTable::new(
            [("a", vec![("a", 0.5), ("b", 0.5)]), ("b", vec![("a", 1.0)])],
            1e-9,
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        assert!(t.contains(&"a"));
        assert_eq!(t.get(&"b").unwrap().probability(&"a"), 1.0);
        assert_eq!(t.states().copied().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn rejects_empty_table() {
        let r = TransitionTable::<u8, u8>::new(Vec::<(u8, Vec<(u8, f64)>)>::new(), 1e-9);
        assert!(matches!(r, Err(MarkovError::EmptyTable)));
    }

    #[test]
    fn rejects_duplicate_state() {
        let r = TransitionTable::new([(1, vec![(1, 1.0)]), (1, vec![(1, 1.0)])], 1e-9);
        assert!(matches!(r, Err(MarkovError::DuplicateState { state }) if state == "1"));
    }

    #[test]
    fn invalid_row_names_state() {
        let r = TransitionTable::new([(1, vec![(1, 1.0)]), (2, vec![(1, 0.3)])], 1e-9);
        match r {
            Err(MarkovError::InvalidRow { state, source }) => {
                assert_eq!(state, "2");
                assert!(matches!(source, DistributionError::RowSum { .. }));
            }
            other => panic!("expected InvalidRow, got {other:?}"),
        }
    }

    #[test]
    fn missing_state_lookup() {
        let t = TransitionTable::new([(1, vec![(1, 1.0)])], 1e-9).unwrap();
        assert!(matches!(
            t.get(&9),
            Err(MarkovError::StateNotFound { state }) if state == "9"
        ));
    }
}
