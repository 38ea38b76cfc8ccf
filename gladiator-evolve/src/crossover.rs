//! Crossover operator for strength allocations
//!
//! A child is a random convex blend of two elite parents, so it keeps the
//! parents' shared total strength.

use gladiator_core::{GladiatorError, Result, StrengthVector};
use rand::distributions::Open01;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::mutation::distinct_pair;
use crate::pool::{task_seeds, WorkerPool};

/// Blend two parents element by element.
///
/// With `alpha` uniform on (0, 1) the child is `alpha * a + (1 - alpha) * b`.
///
/// # Arguments
/// * `a` - First parent team
/// * `b` - Second parent team
/// * `rng` - Random number generator
///
/// # Returns
/// New team, or `LengthMismatch` when the parents have different rosters
pub fn crossover_teams<R: Rng>(
    a: &StrengthVector,
    b: &StrengthVector,
    rng: &mut R,
) -> Result<StrengthVector> {
    let alpha: f64 = rng.sample(Open01);
    let mut child = a * alpha;
    child.try_add_assign(&(b * (1.0 - alpha)))?;
    Ok(child)
}

/// Produce `count` children from two distinct parents each, on the worker pool
pub fn breed<R: Rng>(
    parents: &[StrengthVector],
    count: usize,
    pool: &WorkerPool,
    rng: &mut R,
) -> Result<Vec<StrengthVector>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if parents.len() < 2 {
        return Err(GladiatorError::InvalidConfig(format!(
            "crossover needs at least two parents, got {}",
            parents.len()
        )));
    }

    let seeds = task_seeds(rng, count);
    pool.try_map_batched(&seeds, |&seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (i, j) = distinct_pair(parents.len(), &mut rng);
        crossover_teams(&parents[i], &parents[j], &mut rng)
    })
}
