//! Random initial generations
//!
//! Every gladiator's raw strength is an independent Exp(1) draw; the team is
//! then rescaled so its strengths add up to the requested total.

use gladiator_core::{Result, StrengthVector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::Exp1;

use crate::pool::{task_seeds, WorkerPool};
use crate::TeamSpec;

/// Draw one team for `spec`
pub fn random_team<R: Rng>(spec: &TeamSpec, rng: &mut R) -> Result<StrengthVector> {
    let mut team = StrengthVector::new(spec.members)?;
    let mut raw_sum = 0.0;

    for j in 0..spec.members {
        let strength: f64 = rng.sample(Exp1);
        raw_sum += strength;
        team[j] = strength;
    }

    team *= spec.total_strength / raw_sum;
    Ok(team)
}

/// Draw `size` teams on the worker pool
pub fn initialize<R: Rng>(
    spec: &TeamSpec,
    size: usize,
    pool: &WorkerPool,
    rng: &mut R,
) -> Result<Vec<StrengthVector>> {
    let seeds = task_seeds(rng, size);
    pool.try_map_batched(&seeds, |&seed| {
        random_team(spec, &mut ChaCha8Rng::seed_from_u64(seed))
    })
}
