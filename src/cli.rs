use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Stochos Markov process simulator.
#[derive(Parser)]
#[command(
    name = "stochos",
    version,
    about = "Simulate Markov processes and Markov reward processes"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Simulate the two-state flip-flop chain.
    FlipFlop(FlipFlopArgs),
    /// Simulate a finite chain loaded from a TOML file.
    Simulate(SimulateArgs),
}

/// How the flip-flop is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Sampling closure around a Bernoulli switch.
    Sampled,
    /// Explicit transition table.
    Finite,
    /// Explicit table with a reward on every transition.
    Reward,
}

/// Arguments for the `flip-flop` subcommand.
#[derive(clap::Args)]
pub struct FlipFlopArgs {
    /// Probability of switching state on each step.
    #[arg(short, long, default_value_t = 0.5)]
    pub p: f64,

    /// Number of trajectory elements to print.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub steps: usize,

    /// RNG seed; drawn from the OS when absent.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Process representation to simulate.
    #[arg(long, value_enum, default_value_t = Variant::Sampled)]
    pub variant: Variant,
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to the chain TOML file.
    #[arg(short, long, default_value = "chain.toml")]
    pub config: PathBuf,

    /// Override the number of states to print.
    #[arg(short = 'n', long)]
    pub steps: Option<usize>,

    /// Override the RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the start state from config.
    #[arg(long)]
    pub start: Option<String>,
}
