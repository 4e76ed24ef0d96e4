//! Error types for the stochos-distribution crate.

/// Error type for all fallible constructors in the stochos-distribution crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DistributionError {
    /// Returned when a probability lies outside `[0, 1]`.
    #[error("probability {value} is outside [0, 1]")]
    InvalidProbability {
        /// The offending probability.
        value: f64,
    },

    /// Returned when a probability or weight is NaN or infinite.
    #[error("probability is not finite: {value}")]
    NonFiniteProbability {
        /// The offending value.
        value: f64,
    },

    /// Returned when outcome probabilities do not sum to one.
    #[error("probabilities sum to {sum}, expected 1 (tolerance {tolerance})")]
    RowSum {
        /// Actual total probability.
        sum: f64,
        /// Accepted absolute deviation from 1.
        tolerance: f64,
    },

    /// Returned when a finite distribution is built from no outcomes.
    #[error("distribution has no outcomes")]
    EmptyOutcomes,

    /// Returned when weights to be normalised sum to zero.
    #[error("weights sum to zero")]
    ZeroTotalWeight,

    /// Returned when a distribution parameter is out of its domain.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the problem.
        reason: String,
    },
}
