//! Markov processes and Markov reward processes over arbitrary state spaces.
//!
//! A process is defined by its transition law: given the current state, the
//! distribution of the next one ([`MarkovProcess`]) or of the next state and
//! the reward earned ([`MarkovRewardProcess`]). Trajectories are generated
//! lazily by repeatedly sampling that law.
//!
//! # Layout
//!
//! ```text
//!  ┌────────────────┐     ┌──────────────────┐     ┌───────────────────┐
//!  │  transition    │────▶│    simulate      │────▶│  Trace iterator   │
//!  │  (law of S')   │     │  (start state)   │     │  (pull one step)  │
//!  └────────────────┘     └──────────────────┘     └───────────────────┘
//! ```
//!
//! Generic processes implement the traits with arbitrary code; finite ones
//! ([`FiniteMarkovProcess`], [`FiniteMarkovRewardProcess`]) are built from an
//! explicit table and expose exact probabilities.
//!
//! # Quick start
//!
//! ```rust
//! use stochos_markov::{FiniteMarkovProcess, MarkovConfig, MarkovProcess};
//!
//! let config = MarkovConfig::new().with_seed(7);
//! let weather = FiniteMarkovProcess::with_config(
//!     [
//!         ("sun", vec![("sun", 0.8), ("rain", 0.2)]),
//!         ("rain", vec![("sun", 0.4), ("rain", 0.6)]),
//!     ],
//!     &config,
//! )
//! .unwrap();
//!
//! let week: Vec<&str> = weather
//!     .simulate("sun", config.make_rng())
//!     .take(7)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(week[0], "sun");
//! ```

pub mod config;
pub mod error;
pub mod finite;
pub mod process;
pub mod reward;
pub mod table;

pub use config::MarkovConfig;
pub use error::MarkovError;
pub use finite::{FiniteMarkovProcess, FiniteMarkovRewardProcess};
pub use process::{MarkovProcess, Trace};
pub use reward::{DropReward, MarkovRewardProcess, RewardTrace, StatesOnly};
pub use table::TransitionTable;
