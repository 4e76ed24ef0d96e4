//! Error types for the stochos-markov crate.

use stochos_distribution::DistributionError;

/// Error type for all fallible operations in the stochos-markov crate.
///
/// States are carried in their `Debug` rendering so the error stays
/// independent of the state type.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarkovError {
    /// Returned when a finite process is built from an empty table.
    #[error("transition table is empty")]
    EmptyTable,

    /// Returned when the same source state appears twice in a table.
    #[error("duplicate source state in transition table: {state}")]
    DuplicateState {
        /// The repeated state.
        state: String,
    },

    /// Returned when a table row is not a valid probability distribution.
    #[error("invalid transition row for state {state}: {source}")]
    InvalidRow {
        /// The source state of the offending row.
        state: String,
        /// Why the row was rejected.
        source: DistributionError,
    },

    /// Returned when a finite process is asked about a state it does not know.
    #[error("state not found in transition table: {state}")]
    StateNotFound {
        /// The unknown state.
        state: String,
    },

    /// Returned when the row-sum tolerance is unusable.
    #[error("invalid tolerance: {value} (must be finite and in (0, 0.001])")]
    InvalidTolerance {
        /// The invalid value.
        value: f64,
    },

    /// Returned when a distribution used by a process cannot be built.
    #[error(transparent)]
    Distribution(#[from] DistributionError),
}
