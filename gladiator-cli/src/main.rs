//! Gladiator CLI - Command-line interface
//!
//! Commands:
//! - duel: Evolve one team against a fixed opponent
//! - arena: Evolve several teams against each other
//! - estimate: Print win probabilities for explicit teams

mod arena;
mod duel;
mod estimate;
mod util;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gladiator")]
#[command(about = "Evolutionary strength allocation for gladiator teams")]
struct Cli {
    /// Seed for the random generator (entropy when omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve one team against a fixed opponent
    Duel(duel::DuelArgs),
    /// Evolve several teams against each other
    Arena(arena::ArenaArgs),
    /// Win probabilities for explicit teams
    Estimate(estimate::EstimateArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Duel(args) => duel::run(args, cli.seed),
        Commands::Arena(args) => arena::run(args, cli.seed),
        Commands::Estimate(args) => estimate::run(args),
    }
}
