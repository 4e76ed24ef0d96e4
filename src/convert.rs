//! Pure conversion functions: TOML config structs -> crate API types.

use anyhow::{Context, Result, bail};

use stochos_markov::{FiniteMarkovProcess, MarkovConfig};

use crate::config::ChainToml;

/// Builds a validated [`MarkovConfig`], letting `seed` override the file's.
pub fn build_markov_config(chain: &ChainToml, seed: Option<u64>) -> Result<MarkovConfig> {
    let mut cfg = MarkovConfig::new().with_tolerance(chain.tolerance);
    if let Some(s) = seed.or(chain.seed) {
        cfg = cfg.with_seed(s);
    }
    cfg.validate().context("invalid chain configuration")?;
    Ok(cfg)
}

/// Builds the finite chain described by `[transitions]`.
pub fn build_chain(chain: &ChainToml, cfg: &MarkovConfig) -> Result<FiniteMarkovProcess<String>> {
    let rows = chain.transitions.iter().map(|(from, row)| {
        let row = row.iter().map(|(to, &p)| (to.clone(), p)).collect::<Vec<_>>();
        (from.clone(), row)
    });
    FiniteMarkovProcess::with_config(rows, cfg).context("failed to build transition table")
}

/// Picks the start state: the override, then the file's, then the first row.
pub fn resolve_start(chain: &ChainToml, start: Option<String>) -> Result<String> {
    let start = match start.or_else(|| chain.start.clone()) {
        Some(s) => s,
        None => match chain.transitions.keys().next() {
            Some(first) => first.clone(),
            None => bail!("no transitions: add a [transitions] table to the config"),
        },
    };
    if !chain.transitions.contains_key(&start) {
        bail!("start state {start:?} has no row in [transitions]");
    }
    Ok(start)
}
