//! Probability distributions for simulating stochastic processes.
//!
//! Every distribution can draw outcomes ([`Distribution`]). Finite ones can
//! also enumerate their outcomes with exact probabilities
//! ([`FiniteDistribution`]).
//!
//! | Type | Kind | Outcomes |
//! |------|------|----------|
//! | [`Categorical`] | finite | explicit `(outcome, probability)` pairs |
//! | [`Bernoulli`] | finite | `true` with probability `p` |
//! | [`Constant`] | finite | a single value |
//! | [`Choose`] | finite | uniform over a list |
//! | [`SampledDistribution`] | sampled | whatever the sampler returns |
//! | [`Uniform`], [`Gaussian`] | sampled | `f64` |
//! | [`Poisson`] | sampled | `u64` counts |
//!
//! # Quick start
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use stochos_distribution::{Categorical, Distribution, FiniteDistribution};
//!
//! let weather = Categorical::new([("sun", 0.7), ("rain", 0.3)]).unwrap();
//! assert_eq!(weather.probability(&"rain"), 0.3);
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let today = weather.sample(&mut rng);
//! assert!(today == "sun" || today == "rain");
//! ```

pub mod continuous;
pub mod distribution;
pub mod error;
pub mod finite;
pub mod sampled;

pub use continuous::{Gaussian, Poisson, Uniform};
pub use distribution::{Distribution, FiniteDistribution, Mapped};
pub use error::DistributionError;
pub use finite::{Bernoulli, Categorical, Choose, Constant, DEFAULT_TOLERANCE};
pub use sampled::{DEFAULT_EXPECTATION_SAMPLES, SampledDistribution};
