//! Generation loop
//!
//! Both variants share one shape: draw a random generation, score it, then
//! for every epoch rebuild the generation from its elite and score it again.
//! A generation is always kept sorted best first.
//!
//! Reproduction fills the next generation slot by slot, with `E` elite teams
//! and `K` unchanged survivors (`K <= E`):
//! - `[0, K)`: the top `K` teams, copied
//! - `[K, E)`: elite teams `K..E`, each mutated once
//! - `[E, G)`: crossovers of two distinct elite teams

use gladiator_core::{GladiatorError, Result, StrengthVector};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::crossover::breed;
use crate::fitness::{evaluate_against, evaluate_round_robin};
use crate::mutation::mutate_generation;
use crate::pool::WorkerPool;
use crate::population::initialize;
use crate::selection::rank_by_fitness;
use crate::{EvolutionConfig, TeamSpec};

// ============================================================================
// RESULT
// ============================================================================

/// Final generation of one evolving population plus its fitness history
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Final generation, best team first
    pub population: Vec<StrengthVector>,
    /// Fitness of `population`, same order
    pub fitness: Vec<f64>,
    /// Best fitness per generation, initial generation included
    pub best_fitness_history: Vec<f64>,
    /// Mean fitness per generation, initial generation included
    pub avg_fitness_history: Vec<f64>,
}

impl EvolutionResult {
    fn new(population: Vec<StrengthVector>, fitness: Vec<f64>) -> Self {
        let mut result = Self {
            population,
            fitness,
            best_fitness_history: Vec::new(),
            avg_fitness_history: Vec::new(),
        };
        result.record();
        result
    }

    fn replace(&mut self, population: Vec<StrengthVector>, fitness: Vec<f64>) {
        self.population = population;
        self.fitness = fitness;
        self.record();
    }

    fn record(&mut self) {
        let best = self.fitness.first().copied().unwrap_or(0.0);
        let avg = if self.fitness.is_empty() {
            0.0
        } else {
            self.fitness.iter().sum::<f64>() / self.fitness.len() as f64
        };
        self.best_fitness_history.push(best);
        self.avg_fitness_history.push(avg);
    }

    /// Best team of the final generation
    pub fn best(&self) -> Option<&StrengthVector> {
        self.population.first()
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.fitness.first().copied()
    }

    /// Up to `n` best teams with their fitness
    pub fn top(&self, n: usize) -> impl Iterator<Item = (&StrengthVector, f64)> {
        self.population
            .iter()
            .zip(self.fitness.iter().copied())
            .take(n)
    }
}

// ============================================================================
// SINGLE OPPONENT
// ============================================================================

/// Evolve one team against a fixed opponent
pub fn evolve_against<R: Rng>(
    team: &TeamSpec,
    opponent: &StrengthVector,
    config: &EvolutionConfig,
    rng: &mut R,
) -> Result<EvolutionResult> {
    evolve_against_with_callback(team, opponent, config, rng, |_, _, _| {})
}

/// Evolve one team against a fixed opponent.
///
/// `callback` sees every generation after it is scored and sorted, starting
/// with the random one at index 0.
pub fn evolve_against_with_callback<R, C>(
    team: &TeamSpec,
    opponent: &StrengthVector,
    config: &EvolutionConfig,
    rng: &mut R,
    mut callback: C,
) -> Result<EvolutionResult>
where
    R: Rng,
    C: FnMut(usize, &[StrengthVector], &[f64]),
{
    config.validate()?;
    team.validate()?;
    let pool = WorkerPool::new(config.threads)?;

    info!(
        "Evolving {} gladiators (total {}) against {} opponents: gen={}, epochs={}",
        team.members,
        team.total_strength,
        opponent.len(),
        config.generation_size,
        config.epochs
    );

    let population = initialize(team, config.generation_size, &pool, rng)?;
    let fitness = evaluate_against(&population, opponent, &pool)?;
    let (population, fitness) = rank_by_fitness(&population, &fitness);
    callback(0, &population, &fitness);
    let mut result = EvolutionResult::new(population, fitness);

    for epoch in 1..=config.epochs {
        let next = reproduce(&result.population, config, &pool, rng)?;
        let fitness = evaluate_against(&next, opponent, &pool)?;
        let (population, fitness) = rank_by_fitness(&next, &fitness);

        debug!("Epoch {}: best={:.6}", epoch, fitness[0]);
        callback(epoch, &population, &fitness);
        result.replace(population, fitness);
    }

    info!(
        "Evolution finished: best={:.6}",
        result.best_fitness().unwrap_or(0.0)
    );
    Ok(result)
}

// ============================================================================
// ROUND ROBIN
// ============================================================================

/// Evolve several teams against each other
pub fn evolve_teams<R: Rng>(
    teams: &[TeamSpec],
    config: &EvolutionConfig,
    rng: &mut R,
) -> Result<Vec<EvolutionResult>> {
    evolve_teams_with_callback(teams, config, rng, |_, _, _| {})
}

/// Evolve several teams against each other.
///
/// Every population has `generation_size` teams and is bred on its own;
/// scoring is joint, through [`evaluate_round_robin`].
pub fn evolve_teams_with_callback<R, C>(
    teams: &[TeamSpec],
    config: &EvolutionConfig,
    rng: &mut R,
    mut callback: C,
) -> Result<Vec<EvolutionResult>>
where
    R: Rng,
    C: FnMut(usize, &[Vec<StrengthVector>], &[Vec<f64>]),
{
    if teams.is_empty() {
        return Err(GladiatorError::EmptyTeams);
    }
    config.validate()?;
    for team in teams {
        team.validate()?;
    }
    let pool = WorkerPool::new(config.threads)?;

    info!(
        "Evolving {} teams in round robin: gen={}, epochs={}",
        teams.len(),
        config.generation_size,
        config.epochs
    );

    let mut populations = Vec::with_capacity(teams.len());
    for team in teams {
        populations.push(initialize(team, config.generation_size, &pool, rng)?);
    }
    let (populations, fitness) = score_round_robin(&populations, &pool)?;
    callback(0, &populations, &fitness);

    let mut results: Vec<EvolutionResult> = populations
        .into_iter()
        .zip(fitness)
        .map(|(population, fitness)| EvolutionResult::new(population, fitness))
        .collect();

    for epoch in 1..=config.epochs {
        let mut next = Vec::with_capacity(results.len());
        for result in &results {
            next.push(reproduce(&result.population, config, &pool, rng)?);
        }
        let (populations, fitness) = score_round_robin(&next, &pool)?;

        debug!(
            "Epoch {}: best={:?}",
            epoch,
            fitness.iter().map(|f| f[0]).collect::<Vec<_>>()
        );
        callback(epoch, &populations, &fitness);

        for ((result, population), fitness) in results.iter_mut().zip(populations).zip(fitness) {
            result.replace(population, fitness);
        }
    }

    info!(
        "Round robin finished: best={:?}",
        results.iter().filter_map(EvolutionResult::best_fitness).collect::<Vec<_>>()
    );
    Ok(results)
}

/// Score every population jointly and sort each one best first
fn score_round_robin(
    populations: &[Vec<StrengthVector>],
    pool: &WorkerPool,
) -> Result<(Vec<Vec<StrengthVector>>, Vec<Vec<f64>>)> {
    let fitness = evaluate_round_robin(populations, pool)?;
    Ok(populations
        .iter()
        .zip(&fitness)
        .map(|(population, fitness)| rank_by_fitness(population, fitness))
        .unzip())
}

// ============================================================================
// REPRODUCTION
// ============================================================================

/// Build the next generation from a generation sorted best first
fn reproduce<R: Rng>(
    ranked: &[StrengthVector],
    config: &EvolutionConfig,
    pool: &WorkerPool,
    rng: &mut R,
) -> Result<Vec<StrengthVector>> {
    let elite = config.elite_count();
    let survivors = config.elitism;

    let mut next = Vec::with_capacity(config.generation_size);
    next.extend_from_slice(&ranked[..survivors]);
    next.extend(mutate_generation(&ranked[survivors..elite], pool, rng));
    next.extend(breed(
        &ranked[..elite],
        config.generation_size - elite,
        pool,
        rng,
    )?);
    Ok(next)
}
