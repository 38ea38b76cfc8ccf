//! Fitness evaluation for evolution
//!
//! Fitness is a win probability. Against a fixed opponent it is the duel
//! odds of each team; in a round robin it is a team's win probability
//! averaged over every combination of the other populations.

use gladiator_core::{
    win_probabilities, win_probability, GladiatorError, MultiIndex, Result, StrengthVector,
};
use tracing::debug;

use crate::pool::WorkerPool;

/// Win probability of every team against `opponent`, in population order
pub fn evaluate_against(
    population: &[StrengthVector],
    opponent: &StrengthVector,
    pool: &WorkerPool,
) -> Result<Vec<f64>> {
    pool.try_map_batched(population, |team| win_probability(team, opponent))
}

/// Round-robin fitness for several populations evolving side by side.
///
/// Every tuple that takes one team from each population is scored with a
/// joint win estimate. Tuples are streamed in batches of one per worker;
/// each batch is scored on the pool and folded into the totals before the
/// next batch is built. `result[l][i]` is the mean win probability of team
/// `i` of population `l` over all tuples containing it.
pub fn evaluate_round_robin(
    populations: &[Vec<StrengthVector>],
    pool: &WorkerPool,
) -> Result<Vec<Vec<f64>>> {
    if populations.is_empty() {
        return Err(GladiatorError::EmptyTeams);
    }

    let sizes: Vec<usize> = populations.iter().map(Vec::len).collect();
    let mut counter = MultiIndex::new(sizes.clone())?;
    let tuples_total = counter.cardinality();
    let mut totals: Vec<Vec<f64>> = sizes.iter().map(|&n| vec![0.0; n]).collect();

    let batch_size = pool.threads();
    let mut batch: Vec<Vec<usize>> = Vec::with_capacity(batch_size);
    let mut exhausted = false;

    while !exhausted {
        batch.push(counter.index().to_vec());
        exhausted = !counter.advance();

        if batch.len() == batch_size || exhausted {
            let scores = pool.try_map_batched(&batch, |tuple| {
                let lineup: Vec<StrengthVector> = tuple
                    .iter()
                    .zip(populations)
                    .map(|(&i, population)| population[i].clone())
                    .collect();
                win_probabilities(&lineup)
            })?;

            for (tuple, probs) in batch.iter().zip(scores) {
                for (l, (&i, p)) in tuple.iter().zip(probs).enumerate() {
                    totals[l][i] += p;
                }
            }
            batch.clear();
        }
    }

    debug!("Round robin scored {} lineups", tuples_total);

    for (l, row) in totals.iter_mut().enumerate() {
        let appearances = (tuples_total / sizes[l]) as f64;
        for value in row.iter_mut() {
            *value /= appearances;
        }
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sv(values: &[f64]) -> StrengthVector {
        StrengthVector::from_vec(values.to_vec()).unwrap()
    }

    #[test]
    fn test_evaluate_against_matches_duel_odds() {
        let pool = WorkerPool::new(2).unwrap();
        let population = vec![sv(&[1.0]), sv(&[3.0]), sv(&[0.5, 0.5])];
        let opponent = sv(&[1.0]);

        let fitness = evaluate_against(&population, &opponent, &pool).unwrap();

        assert_eq!(fitness.len(), 3);
        assert!((fitness[0] - 0.5).abs() < 1e-12);
        assert!((fitness[1] - 0.75).abs() < 1e-12);
        for (team, &score) in population.iter().zip(&fitness) {
            assert!((score - win_probability(team, &opponent).unwrap()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_evaluate_against_rejects_bad_strength() {
        let pool = WorkerPool::new(1).unwrap();
        let population = vec![sv(&[1.0]), sv(&[0.0])];
        assert!(evaluate_against(&population, &sv(&[1.0]), &pool).is_err());
    }

    #[test]
    fn test_round_robin_two_populations_are_complementary() {
        let pool = WorkerPool::new(3).unwrap();
        let first = vec![sv(&[1.0, 0.5]), sv(&[0.2, 1.3]), sv(&[0.75, 0.75])];
        let second = vec![sv(&[1.5]), sv(&[0.5, 0.5, 0.5])];

        let fitness = evaluate_round_robin(&[first.clone(), second.clone()], &pool).unwrap();

        assert_eq!(fitness[0].len(), 3);
        assert_eq!(fitness[1].len(), 2);

        // Means over opponents: first-team mean against the other population
        for (i, team) in first.iter().enumerate() {
            let expected: f64 = second
                .iter()
                .map(|other| win_probability(team, other).unwrap())
                .sum::<f64>()
                / second.len() as f64;
            assert!((fitness[0][i] - expected).abs() < 1e-9);
        }

        let total_first: f64 = fitness[0].iter().sum::<f64>() / 3.0;
        let total_second: f64 = fitness[1].iter().sum::<f64>() / 2.0;
        assert!((total_first + total_second - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_round_robin_identical_populations_share_evenly() {
        let pool = WorkerPool::new(2).unwrap();
        let population = vec![sv(&[1.0, 1.0]), sv(&[1.0, 1.0])];

        let fitness = evaluate_round_robin(&vec![population; 3], &pool).unwrap();

        for row in &fitness {
            for &value in row {
                assert!((value - 1.0 / 3.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_round_robin_same_for_any_thread_count() {
        let first = vec![sv(&[1.0, 0.4]), sv(&[0.3, 1.1]), sv(&[0.7, 0.7])];
        let second = vec![sv(&[0.9, 0.6, 0.1]), sv(&[0.5, 0.5, 0.6])];
        let third = vec![sv(&[1.6])];
        let populations = vec![first, second, third];

        let one = evaluate_round_robin(&populations, &WorkerPool::new(1).unwrap()).unwrap();
        let four = evaluate_round_robin(&populations, &WorkerPool::new(4).unwrap()).unwrap();

        for (a, b) in one.iter().flatten().zip(four.iter().flatten()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_round_robin_rejects_empty() {
        let pool = WorkerPool::new(1).unwrap();
        assert_eq!(
            evaluate_round_robin(&[], &pool),
            Err(GladiatorError::EmptyTeams)
        );
    }
}
