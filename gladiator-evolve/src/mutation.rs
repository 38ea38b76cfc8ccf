//! Mutation operator for strength allocations
//!
//! A mutation picks two different gladiators of one team and re-splits
//! their combined strength at a random point. The team total never changes.

use gladiator_core::StrengthVector;
use rand::distributions::Open01;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::pool::{task_seeds, WorkerPool};

/// Pick two distinct indices below `len` (`len >= 2`)
pub fn distinct_pair<R: Rng>(len: usize, rng: &mut R) -> (usize, usize) {
    let first = rng.gen_range(0..len);
    let mut second = rng.gen_range(0..len - 1);
    if second >= first {
        second += 1;
    }
    (first, second)
}

/// Apply one redistribution to a copy of `team`.
///
/// With `s = team[i] + team[j]` and `alpha` uniform on (0, 1), the copy gets
/// `s * alpha` at `i` and `s * (1 - alpha)` at `j`. Teams with a single
/// gladiator have nothing to redistribute and come back unchanged.
///
/// # Arguments
/// * `team` - Team to mutate
/// * `rng` - Random number generator
///
/// # Returns
/// New team with one redistribution applied
pub fn mutate_team<R: Rng>(team: &StrengthVector, rng: &mut R) -> StrengthVector {
    let mut mutated = team.clone();
    if team.len() < 2 {
        return mutated;
    }

    let (i, j) = distinct_pair(team.len(), rng);
    let alpha: f64 = rng.sample(Open01);

    let pair_strength = mutated[i] + mutated[j];
    mutated[i] = pair_strength * alpha;
    mutated[j] = pair_strength * (1.0 - alpha);

    mutated
}

/// Mutate every team of `teams` on the worker pool, preserving order
pub fn mutate_generation<R: Rng>(
    teams: &[StrengthVector],
    pool: &WorkerPool,
    rng: &mut R,
) -> Vec<StrengthVector> {
    let jobs: Vec<(&StrengthVector, u64)> = teams.iter().zip(task_seeds(rng, teams.len())).collect();
    pool.map_batched(&jobs, |(team, seed)| {
        mutate_team(team, &mut ChaCha8Rng::seed_from_u64(*seed))
    })
}
