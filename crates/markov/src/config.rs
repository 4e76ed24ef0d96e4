//! Configuration for building and simulating Markov processes.

use rand::SeedableRng;
use rand::rngs::StdRng;
use stochos_distribution::DEFAULT_TOLERANCE;

use crate::error::MarkovError;

/// Largest accepted row-sum tolerance.
pub const MAX_TOLERANCE: f64 = 1e-3;

/// Configuration for finite process construction and simulation.
///
/// Use the builder methods to customise parameters.
///
/// # Example
///
/// ```
/// use stochos_markov::MarkovConfig;
///
/// let config = MarkovConfig::new()
///     .with_tolerance(1e-6)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct MarkovConfig {
    tolerance: f64,
    seed: Option<u64>,
}

impl MarkovConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `tolerance = 1e-9`, no seed (OS entropy).
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            seed: None,
        }
    }

    /// Sets the absolute tolerance for table rows summing to one.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Seeds the random source returned by [`MarkovConfig::make_rng`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the row-sum tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates this configuration.
    ///
    /// The tolerance must be finite and in `(0, MAX_TOLERANCE]`.
    pub fn validate(&self) -> Result<(), MarkovError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 || self.tolerance > MAX_TOLERANCE
        {
            return Err(MarkovError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        Ok(())
    }

    /// Builds a seeded or OS-sourced RNG.
    pub fn make_rng(&self) -> StdRng {
        match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Default for MarkovConfig {
    fn default() -> Self {
        Self::new()
    }
}
