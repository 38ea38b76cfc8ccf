//! Arena command - evolve several teams against each other
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_teams(), run_evolution(), print_results()
//! - Level 3: build_evolution_config(), print_json_results()

use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Args;
use rand_chacha::ChaCha8Rng;

use gladiator_core::StrengthVector;
use gladiator_evolve::{evolve_teams_with_callback, EvolutionConfig, EvolutionResult, TeamSpec};

use crate::util::{create_rng, format_duration, parse_list, resolve_threads};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ArenaArgs {
    /// Total strength of each team, comma separated
    #[arg(long, default_value = "1,1.2,1.4")]
    pub strengths: String,

    /// Gladiators in each team, comma separated
    #[arg(long, default_value = "5,6,7")]
    pub members: String,

    /// Teams per generation, per population
    #[arg(long, default_value = "75")]
    pub generation: usize,

    /// Reproduction rounds
    #[arg(long, default_value = "75")]
    pub epochs: usize,

    /// Share of each generation kept as elite (0.0-1.0, exclusive)
    #[arg(long, default_value = "0.95")]
    pub fraction: f64,

    /// Top teams copied unchanged into the next generation
    #[arg(long, default_value = "0")]
    pub elitism: usize,

    /// Worker threads (default: all cores)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Teams to print per population
    #[arg(long, default_value = "3")]
    pub top: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run arena command
pub fn run(args: ArenaArgs, seed: Option<u64>) -> Result<()> {
    let start = Instant::now();
    let teams = build_teams(&args)?;
    let config = build_evolution_config(&args)?;
    let mut rng = create_rng(seed);

    let results = run_evolution(&teams, &config, &mut rng)?;

    if args.json {
        print_json_results(&teams, &results, args.top)?;
    } else {
        print_results(&results, args.top);
        println!("Time work: {}", format_duration(start.elapsed()));
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Pair up `--strengths` and `--members`
fn build_teams(args: &ArenaArgs) -> Result<Vec<TeamSpec>> {
    let strengths = parse_list::<f64>(&args.strengths).context("Failed to parse --strengths")?;
    let members = parse_list::<usize>(&args.members).context("Failed to parse --members")?;

    if strengths.len() != members.len() {
        bail!(
            "--strengths has {} entries but --members has {}",
            strengths.len(),
            members.len()
        );
    }
    if strengths.is_empty() {
        bail!("At least one team is required");
    }

    Ok(strengths
        .into_iter()
        .zip(members)
        .map(|(total, count)| TeamSpec::new(total, count))
        .collect())
}

/// Run the round robin with progress callback
fn run_evolution(
    teams: &[TeamSpec],
    config: &EvolutionConfig,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<EvolutionResult>> {
    let callback = |epoch: usize, _pops: &[Vec<StrengthVector>], fitness: &[Vec<f64>]| {
        let best: Vec<String> = fitness
            .iter()
            .map(|f| format!("{:.4}", f.first().copied().unwrap_or(0.0)))
            .collect();
        tracing::info!("Generation {}: best=[{}]", epoch, best.join(", "));
    };

    evolve_teams_with_callback(teams, config, rng, callback).context("Round robin evolution failed")
}

/// Print the best teams of every population
fn print_results(results: &[EvolutionResult], top: usize) {
    println!("***** TOP *****");
    for (i, result) in results.iter().enumerate() {
        println!();
        println!("***** Team {} *****", i);
        for (team, probability) in result.top(top) {
            println!("Probability of win: {}", probability);
            println!("{}", team);
        }
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Build evolution configuration from command arguments
fn build_evolution_config(args: &ArenaArgs) -> Result<EvolutionConfig> {
    let config = EvolutionConfig::new(args.generation, args.epochs)
        .with_elite_fraction(args.fraction)
        .with_elitism(args.elitism)
        .with_threads(resolve_threads(args.threads)?);
    config.validate().context("Invalid evolution settings")?;
    Ok(config)
}

/// Print results as JSON
fn print_json_results(teams: &[TeamSpec], results: &[EvolutionResult], top: usize) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonTeam<'a> {
        probability: f64,
        strengths: &'a StrengthVector,
    }

    #[derive(serde::Serialize)]
    struct JsonPopulation<'a> {
        spec: &'a TeamSpec,
        top: Vec<JsonTeam<'a>>,
        best_fitness_history: &'a [f64],
    }

    let output: Vec<JsonPopulation> = teams
        .iter()
        .zip(results)
        .map(|(spec, result)| JsonPopulation {
            spec,
            top: result
                .top(top)
                .map(|(strengths, probability)| JsonTeam { probability, strengths })
                .collect(),
            best_fitness_history: &result.best_fitness_history,
        })
        .collect();

    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
