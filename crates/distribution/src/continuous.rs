//! Closed-form samplers backed by `rand_distr`.

use rand::RngCore;
use rand_distr::Distribution as RandDistribution;

use crate::distribution::Distribution;
use crate::error::DistributionError;

/// Continuous uniform distribution on `[low, high)`.
#[derive(Debug, Clone, Copy)]
pub struct Uniform {
    low: f64,
    high: f64,
    inner: rand_distr::Uniform<f64>,
}

impl Uniform {
    /// Creates a uniform distribution on `[low, high)`.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::InvalidParameter`] if either bound is
    /// non-finite or `low >= high`.
    pub fn new(low: f64, high: f64) -> Result<Self, DistributionError> {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(DistributionError::InvalidParameter {
                name: "range",
                reason: format!("need finite low < high, got [{low}, {high})"),
            });
        }
        let inner = rand_distr::Uniform::new(low, high).map_err(|e| {
            DistributionError::InvalidParameter {
                name: "range",
                reason: e.to_string(),
            }
        })?;
        Ok(Self { low, high, inner })
    }

    /// The standard uniform distribution on `[0, 1)`.
    pub fn unit() -> Self {
        Self::new(0.0, 1.0).expect("[0, 1) is a valid range")
    }

    /// Lower bound.
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound (exclusive).
    pub fn high(&self) -> f64 {
        self.high
    }
}

impl Distribution<f64> for Uniform {
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        RandDistribution::sample(&self.inner, rng)
    }
}

/// Normal distribution with mean `mu` and standard deviation `sigma`.
#[derive(Debug, Clone, Copy)]
pub struct Gaussian {
    inner: rand_distr::Normal<f64>,
}

impl Gaussian {
    /// Creates a normal distribution.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::InvalidParameter`] if `mu` is non-finite
    /// or `sigma` is non-finite or negative.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, DistributionError> {
        if !mu.is_finite() {
            return Err(DistributionError::InvalidParameter {
                name: "mu",
                reason: format!("must be finite, got {mu}"),
            });
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(DistributionError::InvalidParameter {
                name: "sigma",
                reason: format!("must be finite and non-negative, got {sigma}"),
            });
        }
        let inner = rand_distr::Normal::new(mu, sigma).map_err(|e| {
            DistributionError::InvalidParameter {
                name: "sigma",
                reason: e.to_string(),
            }
        })?;
        Ok(Self { inner })
    }

    /// Mean.
    pub fn mu(&self) -> f64 {
        self.inner.mean()
    }

    /// Standard deviation.
    pub fn sigma(&self) -> f64 {
        self.inner.std_dev()
    }
}

impl Distribution<f64> for Gaussian {
    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        RandDistribution::sample(&self.inner, rng)
    }
}

/// Poisson distribution with rate `lambda`, yielding event counts.
#[derive(Debug, Clone, Copy)]
pub struct Poisson {
    lambda: f64,
    inner: rand_distr::Poisson<f64>,
}

impl Poisson {
    /// Creates a Poisson distribution.
    ///
    /// # Errors
    ///
    /// Returns [`DistributionError::InvalidParameter`] if `lambda` is
    /// non-finite or not positive.
    pub fn new(lambda: f64) -> Result<Self, DistributionError> {
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(DistributionError::InvalidParameter {
                name: "lambda",
                reason: format!("must be finite and positive, got {lambda}"),
            });
        }
        let inner = rand_distr::Poisson::new(lambda).map_err(|e| {
            DistributionError::InvalidParameter {
                name: "lambda",
                reason: e.to_string(),
            }
        })?;
        Ok(Self { lambda, inner })
    }

    /// Rate parameter.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl Distribution<u64> for Poisson {
    fn sample(&self, rng: &mut dyn RngCore) -> u64 {
        let k: f64 = RandDistribution::sample(&self.inner, rng);
        k as u64
    }
}
