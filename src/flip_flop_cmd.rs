//! Flip-flop command: the two-state chain in each of its representations.

use anyhow::{Context, Result};
use rand::RngCore;
use tracing::{info, info_span};

use stochos_distribution::{Bernoulli, Distribution, SampledDistribution};
use stochos_markov::{
    FiniteMarkovProcess, FiniteMarkovRewardProcess, MarkovConfig, MarkovError, MarkovProcess,
    MarkovRewardProcess,
};

use crate::cli::{FlipFlopArgs, Variant};

/// Switches between `true` and `false` with probability `p` on each step.
struct FlipFlop {
    switch: Bernoulli,
}

impl FlipFlop {
    fn new(p: f64) -> Result<Self, MarkovError> {
        Ok(Self {
            switch: Bernoulli::new(p)?,
        })
    }
}

impl MarkovProcess<bool> for FlipFlop {
    type Transition<'a> = Box<dyn Distribution<bool> + 'a>;

    fn transition(&self, state: &bool) -> Result<Self::Transition<'_>, MarkovError> {
        let switch = self.switch;
        Ok(Box::new(SampledDistribution::new(
            *state,
            move |&state: &bool, rng: &mut dyn RngCore| {
                if switch.sample(rng) { !state } else { state }
            },
        )))
    }
}

fn finite_flip_flop(p: f64) -> Result<FiniteMarkovProcess<bool>, MarkovError> {
    FiniteMarkovProcess::new([true, false].map(|b| (b, [(!b, p), (b, 1.0 - p)])))
}

/// Leaving `true` pays 1; every other transition pays 0.5.
fn reward_flip_flop(p: f64) -> Result<FiniteMarkovRewardProcess<bool>, MarkovError> {
    FiniteMarkovRewardProcess::new([
        (true, [((false, 1.0), p), ((true, 0.5), 1.0 - p)]),
        (false, [((true, 0.5), p), ((false, 0.5), 1.0 - p)]),
    ])
}

/// Trajectory of a flip-flop run.
#[derive(Debug)]
enum Outcome {
    States(Vec<bool>),
    Rewards(Vec<(bool, f64)>),
}

fn simulate(args: &FlipFlopArgs, rng: &mut impl RngCore) -> Result<Outcome> {
    let outcome = match args.variant {
        Variant::Sampled => {
            let process = FlipFlop::new(args.p).context("invalid switch probability")?;
            let states = process
                .simulate(true, rng)
                .take(args.steps)
                .collect::<Result<_, _>>()?;
            Outcome::States(states)
        }
        Variant::Finite => {
            let process = finite_flip_flop(args.p).context("failed to build flip-flop table")?;
            let states = process
                .simulate(true, rng)
                .take(args.steps)
                .collect::<Result<_, _>>()?;
            Outcome::States(states)
        }
        Variant::Reward => {
            let process = reward_flip_flop(args.p).context("failed to build flip-flop table")?;
            let pairs = process
                .simulate_reward(true, rng)
                .take(args.steps)
                .collect::<Result<_, _>>()?;
            Outcome::Rewards(pairs)
        }
    };
    Ok(outcome)
}

/// Run the flip-flop simulation and print the trajectory.
pub fn run(args: FlipFlopArgs) -> Result<()> {
    let _cmd = info_span!("flip_flop", variant = ?args.variant).entered();

    let mut cfg = MarkovConfig::new();
    if let Some(s) = args.seed {
        cfg = cfg.with_seed(s);
    }
    let mut rng = cfg.make_rng();

    info!(p = args.p, steps = args.steps, "simulating flip-flop");
    match simulate(&args, &mut rng)? {
        Outcome::States(states) => {
            for s in &states {
                println!("{s}");
            }
            let trues = states.iter().filter(|&&s| s).count();
            println!("true: {trues} of {}", states.len());
        }
        Outcome::Rewards(pairs) => {
            for (s, r) in &pairs {
                println!("{s}\t{r}");
            }
            let total: f64 = pairs.iter().map(|(_, r)| r).sum();
            println!("cumulative reward: {total}");
        }
    }
    Ok(())
}
