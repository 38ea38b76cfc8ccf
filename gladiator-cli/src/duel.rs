//! Duel command - evolve one team against a fixed opponent
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_opponent(), run_evolution(), print_results()
//! - Level 3: build_evolution_config(), print_json_results()
//! - Level 4: shared helpers in `util`

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use rand_chacha::ChaCha8Rng;

use gladiator_core::StrengthVector;
use gladiator_evolve::{evolve_against_with_callback, EvolutionConfig, EvolutionResult, TeamSpec};

use crate::util::{create_rng, format_duration, parse_team, resolve_threads};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct DuelArgs {
    /// Total strength of the evolving team
    #[arg(long, default_value = "1.0")]
    pub strength: f64,

    /// Gladiators in the evolving team
    #[arg(long, default_value = "6")]
    pub members: usize,

    /// Total strength of the opponent, split evenly
    #[arg(long, default_value = "1.12")]
    pub enemy_strength: f64,

    /// Gladiators in the opponent
    #[arg(long, default_value = "100")]
    pub enemy_members: usize,

    /// Explicit opponent strengths, e.g. 0.2,0.3,0.5 (overrides the even split)
    #[arg(long, value_name = "LIST")]
    pub enemy: Option<String>,

    /// Teams per generation
    #[arg(long, default_value = "250")]
    pub generation: usize,

    /// Reproduction rounds
    #[arg(long, default_value = "280")]
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

    /// Teams to print
    #[arg(long, default_value = "7")]
    pub top: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run duel command
///
/// 1. Build the opponent and configuration
/// 2. Run evolution
/// 3. Print the best teams and the elapsed time
pub fn run(args: DuelArgs, seed: Option<u64>) -> Result<()> {
    let start = Instant::now();
    let config = build_evolution_config(&args)?;
    let opponent = build_opponent(&args)?;
    let team = TeamSpec::new(args.strength, args.members);
    let mut rng = create_rng(seed);

    let result = run_evolution(&team, &opponent, &config, &mut rng)?;

    if args.json {
        print_json_results(&result, &opponent, args.top)?;
    } else {
        print_results(&result, args.top);
        println!("Time work: {}", format_duration(start.elapsed()));
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Explicit opponent if given, otherwise an even split
fn build_opponent(args: &DuelArgs) -> Result<StrengthVector> {
    match &args.enemy {
        Some(list) => parse_team(list).context("Failed to parse --enemy"),
        None => StrengthVector::uniform(args.enemy_members, args.enemy_strength)
            .context("Failed to build opponent"),
    }
}

/// Run the evolution loop with progress callback
fn run_evolution(
    team: &TeamSpec,
    opponent: &StrengthVector,
    config: &EvolutionConfig,
    rng: &mut ChaCha8Rng,
) -> Result<EvolutionResult> {
    let callback = |epoch: usize, _pop: &[StrengthVector], fitness: &[f64]| {
        let avg = fitness.iter().sum::<f64>() / fitness.len().max(1) as f64;
        tracing::info!(
            "Generation {}: best={:.6}, avg={:.6}",
            epoch,
            fitness.first().copied().unwrap_or(0.0),
            avg
        );
    };

    evolve_against_with_callback(team, opponent, config, rng, callback)
        .context("Evolution against fixed opponent failed")
}

/// Print the best teams
fn print_results(result: &EvolutionResult, top: usize) {
    println!("***** TOP *****");
    for (team, probability) in result.top(top) {
        println!("Probability of win: {}; {}", probability, team);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Build evolution configuration from command arguments
fn build_evolution_config(args: &DuelArgs) -> Result<EvolutionConfig> {
    let config = EvolutionConfig::new(args.generation, args.epochs)
        .with_elite_fraction(args.fraction)
        .with_elitism(args.elitism)
        .with_threads(resolve_threads(args.threads)?);
    config.validate().context("Invalid evolution settings")?;
    Ok(config)
}

/// Print results as JSON
fn print_json_results(result: &EvolutionResult, opponent: &StrengthVector, top: usize) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonTeam<'a> {
        probability: f64,
        strengths: &'a StrengthVector,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        opponent: &'a StrengthVector,
        top: Vec<JsonTeam<'a>>,
        best_fitness_history: &'a [f64],
        avg_fitness_history: &'a [f64],
    }

    let output = JsonOutput {
        opponent,
        top: result
            .top(top)
            .map(|(strengths, probability)| JsonTeam { probability, strengths })
            .collect(),
        best_fitness_history: &result.best_fitness_history,
        avg_fitness_history: &result.avg_fitness_history,
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: DuelArgs,
    }

    #[test]
    fn test_defaults_match_reference_experiment() {
        let args = TestCli::parse_from(["test"]).args;
        assert_eq!(args.members, 6);
        assert_eq!(args.enemy_members, 100);
        assert!((args.enemy_strength - 1.12).abs() < 1e-12);
        assert_eq!(args.generation, 250);
        assert_eq!(args.epochs, 280);
        assert_eq!(args.top, 7);
    }

    #[test]
    fn test_build_opponent_even_split() {
        let args = TestCli::parse_from(["test", "--enemy-members", "4", "--enemy-strength", "2"]).args;
        let opponent = build_opponent(&args).unwrap();
        assert_eq!(opponent.as_slice(), &[0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_build_opponent_explicit() {
        let args = TestCli::parse_from(["test", "--enemy", "0.2,0.8"]).args;
        let opponent = build_opponent(&args).unwrap();
        assert_eq!(opponent.as_slice(), &[0.2, 0.8]);
    }

    #[test]
    fn test_build_config_rejects_full_fraction() {
        let args = TestCli::parse_from(["test", "--fraction", "1.0", "--threads", "1"]).args;
        assert!(build_evolution_config(&args).is_err());
    }
}
