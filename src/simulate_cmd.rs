//! Simulate command: run a finite chain loaded from TOML.

use anyhow::{Context, Result};
use rand::RngCore;
use tracing::{info, info_span};

use stochos_markov::{FiniteMarkovProcess, MarkovProcess};

use crate::cli::SimulateArgs;
use crate::config::ChainToml;
use crate::convert;

/// Samples `steps` states of `process` starting at `start`.
fn trajectory(
    process: &FiniteMarkovProcess<String>,
    start: String,
    steps: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<String>> {
    process
        .simulate(start, rng)
        .take(steps)
        .collect::<Result<Vec<_>, _>>()
        .context("simulation stopped")
}

/// Run the simulation and print one state per line.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();
    let chain = ChainToml::load(&args.config)?;

    let cfg = convert::build_markov_config(&chain, args.seed)?;
    let process = convert::build_chain(&chain, &cfg)?;
    let start = convert::resolve_start(&chain, args.start)?;
    let steps = args.steps.unwrap_or(chain.steps);
    info!(n_states = process.len(), start = %start, steps, "simulating chain");

    let mut rng = cfg.make_rng();
    for state in trajectory(&process, start, steps, &mut rng)? {
        println!("{state}");
    }
    Ok(())
}
