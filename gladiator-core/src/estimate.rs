//! Win-probability estimation for sequential elimination duels
//!
//! Gladiators fight one at a time in roster order. The winner of a duel
//! stays in the arena and meets the next opponent; a team wins when the
//! other side has nobody left. A single duel between strengths `x` and `y`
//! goes to `x` with probability `x / (x + y)`.

use crate::dense::DenseArray;
use crate::error::{GladiatorError, Result};
use crate::multi_index::MultiIndex;
use crate::strength::StrengthVector;

/// Probability that `left` eliminates the whole of `right`.
///
/// With `p[j][i]` the probability that the first `j` left gladiators outlast
/// the first `i` right ones, `p[j][0] = 1`, `p[0][i] = 0` and
///
/// ```text
/// p[j][i] = (b[i-1] * p[j-1][i] + a[j-1] * p[j][i-1]) / (a[j-1] + b[i-1])
/// ```
///
/// Only `p[m][n]` is returned, so a single row of length `m` is kept and
/// rolled forward once per right gladiator.
pub fn win_probability(left: &StrengthVector, right: &StrengthVector) -> Result<f64> {
    check_strengths(left)?;
    check_strengths(right)?;
    Ok(roll_pairwise(left.as_slice(), right.as_slice()))
}

/// Probability of being the last team standing, for every team at once.
///
/// Entry `(k_0, .., k_{N-1}, j)` of the table holds team `j`'s chance when
/// team `l` has fielded its first `k_l` gladiators. At a joint state the team
/// whose current gladiator falls is picked with weight `1 / strength`, so
///
/// ```text
/// p_j(k) = sum_l p_j(k - e_l) / a_l[k_l - 1]  /  sum_l 1 / a_l[k_l - 1]
/// ```
///
/// over the teams with `k_l > 0`. A team that has not fielded anyone yet
/// scores zero, except at the all-zero start where everyone scores one. The
/// answer sits at the terminal state `k_l = m_l`. Table size is
/// `N * prod(m_l + 1)`, so keep `N` small.
pub fn win_probabilities(teams: &[StrengthVector]) -> Result<Vec<f64>> {
    if teams.is_empty() {
        return Err(GladiatorError::EmptyTeams);
    }
    for team in teams {
        check_strengths(team)?;
    }

    let n = teams.len();
    let state_dims: Vec<usize> = teams.iter().map(|t| t.len() + 1).collect();
    let mut counter = MultiIndex::new(state_dims.clone())?;

    let mut table_dims = state_dims.clone();
    table_dims.push(n);
    let mut table = DenseArray::new(table_dims)?;
    tracing::trace!(teams = n, cells = table.len(), "filling joint win table");

    let mut cell = vec![0usize; n + 1];
    let mut at_origin = true;

    loop {
        cell[..n].copy_from_slice(counter.index());

        for j in 0..n {
            cell[n] = j;
            let value = if at_origin {
                1.0
            } else if cell[j] == 0 {
                0.0
            } else {
                let mut numerator = 0.0;
                let mut denominator = 0.0;
                for l in 0..n {
                    if cell[l] == 0 {
                        continue;
                    }
                    let loser = teams[l][cell[l] - 1];
                    cell[l] -= 1;
                    numerator += table[&cell[..]] / loser;
                    cell[l] += 1;
                    denominator += 1.0 / loser;
                }
                numerator / denominator
            };
            table[&cell[..]] = value;
        }

        at_origin = false;
        if !counter.advance() {
            break;
        }
    }

    for (l, &dim) in state_dims.iter().enumerate() {
        cell[l] = dim - 1;
    }
    Ok((0..n)
        .map(|j| {
            cell[n] = j;
            table[&cell[..]]
        })
        .collect())
}

fn roll_pairwise(left: &[f64], right: &[f64]) -> f64 {
    let m = left.len();
    let mut row = vec![1.0; m];

    for &b in right {
        row[0] = left[0] * row[0] / (left[0] + b);
        for j in 1..m {
            row[j] = (b * row[j - 1] + left[j] * row[j]) / (left[j] + b);
        }
    }

    row[m - 1]
}

fn check_strengths(team: &StrengthVector) -> Result<()> {
    match team.iter().position(|&x| !(x.is_finite() && x > 0.0)) {
        Some(index) => Err(GladiatorError::NonPositiveStrength {
            index,
            value: team[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn sv(values: &[f64]) -> StrengthVector {
        StrengthVector::from_vec(values.to_vec()).unwrap()
    }

    #[test]
    fn test_single_duel_is_strength_ratio() {
        for &(a, b) in &[(1.0, 1.0), (2.0, 1.0), (0.3, 0.7), (5.0, 0.01)] {
            let p = win_probability(&sv(&[a]), &sv(&[b])).unwrap();
            assert!((p - a / (a + b)).abs() < EPS, "{} vs {}: {}", a, b, p);
        }
    }

    #[test]
    fn test_single_duel_symmetry() {
        let a = sv(&[0.4]);
        let b = sv(&[1.1]);
        let p = win_probability(&a, &b).unwrap();
        let q = win_probability(&b, &a).unwrap();
        assert!((p + q - 1.0).abs() < EPS);
    }

    #[test]
    fn test_two_against_one_by_hand() {
        // a1 wins outright, or a1 falls and a2 beats the survivor
        let p = win_probability(&sv(&[1.0, 2.0]), &sv(&[1.0])).unwrap();
        let expected = 0.5 + 0.5 * (2.0 / 3.0);
        assert!((p - expected).abs() < EPS);
    }

    #[test]
    fn test_roster_order_does_not_change_odds() {
        // Worked by hand: both orders give 25/72
        let left = sv(&[1.0, 1.0]);
        let p1 = win_probability(&left, &sv(&[3.0, 0.5])).unwrap();
        let p2 = win_probability(&left, &sv(&[0.5, 3.0])).unwrap();
        assert!((p1 - 25.0 / 72.0).abs() < EPS);
        assert!((p1 - p2).abs() < EPS);
    }

    #[test]
    fn test_multi_member_complement() {
        let a = sv(&[0.3, 0.6, 0.4]);
        let b = sv(&[0.5, 0.8]);
        let p = win_probability(&a, &b).unwrap();
        let q = win_probability(&b, &a).unwrap();
        assert!((p + q - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_monotone_in_left_strength() {
        let right = sv(&[0.5, 0.8, 0.2]);
        let base = sv(&[0.3, 0.6, 0.4, 0.1]);
        let p0 = win_probability(&base, &right).unwrap();

        for i in 0..base.len() {
            let mut stronger = base.clone();
            stronger[i] += 0.25;
            let p = win_probability(&stronger, &right).unwrap();
            assert!(p >= p0 - EPS, "raising gladiator {} lowered odds", i);
        }
    }

    #[test]
    fn test_scale_invariance() {
        let left = sv(&[0.3, 0.6, 0.4]);
        let right = sv(&[0.5, 0.8]);
        let p = win_probability(&left, &right).unwrap();
        let q = win_probability(&(&left * 7.5), &(&right * 7.5)).unwrap();
        assert!((p - q).abs() < 1e-10);
    }

    #[test]
    fn test_probability_in_unit_interval() {
        let left = sv(&[0.1, 2.0, 0.7, 0.05]);
        let right = sv(&[1.0, 0.3, 0.3, 0.9, 0.2]);
        let p = win_probability(&left, &right).unwrap();
        assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn test_rejects_non_positive_strength() {
        let err = win_probability(&sv(&[1.0, 0.0]), &sv(&[1.0])).unwrap_err();
        assert_eq!(err, GladiatorError::NonPositiveStrength { index: 1, value: 0.0 });

        assert!(win_probability(&sv(&[1.0]), &sv(&[-2.0])).is_err());
        assert!(win_probability(&sv(&[f64::NAN]), &sv(&[1.0])).is_err());
    }

    #[test]
    fn test_two_teams_match_pairwise() {
        let a = sv(&[0.3, 0.6, 0.4]);
        let b = sv(&[0.5, 0.8]);
        let pair = win_probability(&a, &b).unwrap();
        let joint = win_probabilities(&[a, b]).unwrap();

        assert_eq!(joint.len(), 2);
        assert!((joint[0] - pair).abs() < 1e-10);
        assert!((joint[1] - (1.0 - pair)).abs() < 1e-10);
    }

    #[test]
    fn test_three_teams_sum_to_one() {
        let teams = vec![sv(&[0.2, 0.5]), sv(&[0.4, 0.1, 0.3]), sv(&[0.6])];
        let probs = win_probabilities(&teams).unwrap();

        assert_eq!(probs.len(), 3);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-10);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_identical_teams_share_evenly() {
        let team = sv(&[0.3, 0.3]);
        let probs = win_probabilities(&[team.clone(), team.clone(), team]).unwrap();
        for p in probs {
            assert!((p - 1.0 / 3.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_single_team_always_wins() {
        let probs = win_probabilities(&[sv(&[0.2, 0.9])]).unwrap();
        assert!((probs[0] - 1.0).abs() < EPS);
    }

    #[test]
    fn test_no_teams_is_an_error() {
        assert_eq!(win_probabilities(&[]), Err(GladiatorError::EmptyTeams));
    }

    #[test]
    fn test_oversized_table_is_an_error() {
        let teams: Vec<StrengthVector> = (0..7)
            .map(|_| StrengthVector::uniform(1000, 1.0).unwrap())
            .collect();
        assert!(matches!(
            win_probabilities(&teams),
            Err(GladiatorError::TableTooLarge { .. })
        ));
    }
}
