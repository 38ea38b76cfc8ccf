//! Selection operators for genetic algorithms
//!
//! Teams are ranked by win probability; the top of the ranking forms the
//! elite pool that seeds the next generation.

use gladiator_core::StrengthVector;

/// Select the top N individuals by fitness.
///
/// Returns indices of the best individuals, sorted by fitness (descending).
/// The sort is stable, so ties keep their original order.
///
/// # Arguments
/// * `fitness` - Fitness scores
/// * `n` - Number of elite individuals to select
///
/// # Returns
/// Vector of indices of the top N individuals
pub fn select_elite(fitness: &[f64], n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..fitness.len()).collect();
    indices.sort_by(|&a, &b| {
        fitness[b].partial_cmp(&fitness[a]).unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(n);
    indices
}

/// Reorder a generation and its fitness so the best team comes first.
///
/// # Panics
/// Panics if population and fitness differ in length
pub fn rank_by_fitness(
    population: &[StrengthVector],
    fitness: &[f64],
) -> (Vec<StrengthVector>, Vec<f64>) {
    assert_eq!(population.len(), fitness.len(), "Population and fitness must have same length");

    let order = select_elite(fitness, fitness.len());
    let ranked = order.iter().map(|&i| population[i].clone()).collect();
    let ranked_fitness = order.iter().map(|&i| fitness[i]).collect();
    (ranked, ranked_fitness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gladiator_core::win_probability;

    fn make_team(id: f64) -> StrengthVector {
        StrengthVector::from_vec(vec![id, 1.0]).unwrap()
    }

    #[test]
    fn test_select_elite_ranks_duel_odds() {
        // Single gladiators against one of strength 1: odds are a / (a + 1)
        let opponent = StrengthVector::from_vec(vec![1.0]).unwrap();
        let strengths = [0.5, 3.0, 1.0, 1.5, 0.2];
        let fitness: Vec<f64> = strengths
            .iter()
            .map(|&a| {
                let team = StrengthVector::from_vec(vec![a]).unwrap();
                win_probability(&team, &opponent).unwrap()
            })
            .collect();

        let elite = select_elite(&fitness, 3);

        assert_eq!(elite, vec![1, 3, 2]); // 0.75, 0.6, 0.5
        assert!((fitness[elite[2]] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_select_elite_caps_at_generation_size() {
        let fitness = vec![0.42, 0.58];
        assert_eq!(select_elite(&fitness, 237), vec![1, 0]);
        assert!(select_elite(&fitness, 0).is_empty());
    }

    #[test]
    fn test_select_elite_is_stable() {
        let fitness = vec![0.4, 0.8, 0.4, 0.8];
        assert_eq!(select_elite(&fitness, 4), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_rank_by_fitness_moves_teams_with_scores() {
        let population: Vec<StrengthVector> = (0..4).map(|i| make_team(i as f64)).collect();
        let fitness = vec![0.2, 0.6, 0.1, 0.4];

        let (ranked, ranked_fitness) = rank_by_fitness(&population, &fitness);

        assert_eq!(ranked_fitness, vec![0.6, 0.4, 0.2, 0.1]);
        let ids: Vec<f64> = ranked.iter().map(|t| t[0]).collect();
        assert_eq!(ids, vec![1.0, 3.0, 0.0, 2.0]);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_rank_by_fitness_length_mismatch() {
        let population = vec![make_team(0.0)];
        rank_by_fitness(&population, &[0.1, 0.2]);
    }
}
