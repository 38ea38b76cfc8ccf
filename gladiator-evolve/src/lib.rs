//! Gladiator Evolution - Genetic algorithm for strength allocation
//!
//! This crate searches for the best way to split a fixed total strength
//! across a team of gladiators:
//! - Random initial generations (`population`)
//! - Fitness against a fixed opponent or in a round robin (`fitness`)
//! - Elite selection (`selection`)
//! - Mutation and crossover operators (`mutation`, `crossover`)
//! - The generation loop itself (`engine`)
//!
//! Parallel work runs on a bounded [`WorkerPool`] in batches of one task
//! per worker thread.

pub mod crossover;
pub mod engine;
pub mod fitness;
pub mod mutation;
pub mod pool;
pub mod population;
pub mod selection;

use gladiator_core::{GladiatorError, Result};
use serde::{Deserialize, Serialize};

pub use engine::{
    evolve_against, evolve_against_with_callback, evolve_teams, evolve_teams_with_callback,
    EvolutionResult,
};
pub use fitness::{evaluate_against, evaluate_round_robin};
pub use pool::WorkerPool;

/// Evolution configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Teams per generation
    pub generation_size: usize,
    /// Reproduction rounds after the initial generation
    pub epochs: usize,
    /// Share of each generation kept as the elite pool, in (0, 1)
    pub elite_fraction: f64,
    /// Worker threads, also the batch size
    pub threads: usize,
    /// Top teams copied unchanged into the next generation
    pub elitism: usize,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            generation_size: 10,
            epochs: 10,
            elite_fraction: 0.5,
            threads: 3,
            elitism: 0,
        }
    }
}

impl EvolutionConfig {
    pub fn new(generation_size: usize, epochs: usize) -> Self {
        Self {
            generation_size,
            epochs,
            ..Self::default()
        }
    }

    pub fn with_elite_fraction(mut self, elite_fraction: f64) -> Self {
        self.elite_fraction = elite_fraction;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_elitism(mut self, elitism: usize) -> Self {
        self.elitism = elitism;
        self
    }

    /// Size of the elite pool, `trunc(generation_size * elite_fraction)`
    pub fn elite_count(&self) -> usize {
        (self.generation_size as f64 * self.elite_fraction) as usize
    }

    /// Reject configurations the generation loop cannot run.
    ///
    /// The elite pool must hold at least two teams so crossover always has
    /// two distinct parents, and must be smaller than the generation so
    /// crossover slots exist.
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(GladiatorError::InvalidThreadCount(
                "at least one worker thread is required".to_string(),
            ));
        }
        if !(self.elite_fraction > 0.0 && self.elite_fraction < 1.0) {
            return Err(GladiatorError::InvalidConfig(format!(
                "elite fraction must lie strictly between 0 and 1, got {}",
                self.elite_fraction
            )));
        }

        let elite = self.elite_count();
        if elite < 2 {
            return Err(GladiatorError::InvalidConfig(format!(
                "generation of {} with fraction {} keeps {} elite teams, need at least 2",
                self.generation_size, self.elite_fraction, elite
            )));
        }
        if self.elitism > elite {
            return Err(GladiatorError::InvalidConfig(format!(
                "elitism {} exceeds elite pool of {}",
                self.elitism, elite
            )));
        }
        Ok(())
    }
}

/// Roster shape of one evolving team
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSpec {
    pub total_strength: f64,
    pub members: usize,
}

impl TeamSpec {
    pub fn new(total_strength: f64, members: usize) -> Self {
        Self {
            total_strength,
            members,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.members == 0 {
            return Err(GladiatorError::InvalidLength(0));
        }
        if !(self.total_strength.is_finite() && self.total_strength > 0.0) {
            return Err(GladiatorError::InvalidConfig(format!(
                "total strength must be positive and finite, got {}",
                self.total_strength
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvolutionConfig::default();
        assert_eq!(config.generation_size, 10);
        assert_eq!(config.epochs, 10);
        assert_eq!(config.threads, 3);
        assert_eq!(config.elite_count(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_elite_count_truncates() {
        let config = EvolutionConfig::new(250, 1).with_elite_fraction(0.95);
        assert_eq!(config.elite_count(), 237);

        let config = EvolutionConfig::new(75, 1).with_elite_fraction(0.95);
        assert_eq!(config.elite_count(), 71);
    }

    #[test]
    fn test_validate_rejects_bad_fraction() {
        for fraction in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let config = EvolutionConfig::default().with_elite_fraction(fraction);
            assert!(matches!(config.validate(), Err(GladiatorError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_validate_rejects_tiny_elite() {
        let config = EvolutionConfig::new(3, 1).with_elite_fraction(0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_excess_elitism() {
        let config = EvolutionConfig::new(10, 1).with_elitism(6);
        assert!(config.validate().is_err());

        let config = EvolutionConfig::new(10, 1).with_elitism(5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let config = EvolutionConfig::default().with_threads(0);
        assert!(matches!(config.validate(), Err(GladiatorError::InvalidThreadCount(_))));
    }

    #[test]
    fn test_team_spec_validation() {
        assert!(TeamSpec::new(1.0, 6).validate().is_ok());
        assert_eq!(TeamSpec::new(1.0, 0).validate(), Err(GladiatorError::InvalidLength(0)));
        assert!(TeamSpec::new(0.0, 3).validate().is_err());
        assert!(TeamSpec::new(f64::INFINITY, 3).validate().is_err());
    }
}
