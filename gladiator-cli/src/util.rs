//! Shared helpers for the commands (Level 4 - utilities)

use std::time::Duration;

use anyhow::{bail, Context, Result};
use gladiator_core::StrengthVector;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Create RNG with optional seed
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Number of hardware threads, at least one
pub fn available_threads() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1)
}

/// Resolve `--threads`: all cores by default, never zero or above the core count
pub fn resolve_threads(requested: Option<usize>) -> Result<usize> {
    let available = available_threads();
    match requested {
        None => Ok(available),
        Some(0) => bail!("There is wrong number of threads: 0"),
        Some(n) if n > available => {
            bail!("There is wrong number of threads: {} (only {} available)", n, available)
        }
        Some(n) => Ok(n),
    }
}

/// Parse a comma-separated list such as `0.2,0.3,0.5`
pub fn parse_list<T>(text: &str) -> Result<Vec<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<T>().with_context(|| format!("Invalid list entry: {:?}", part)))
        .collect()
}

/// Parse a comma-separated team
pub fn parse_team(text: &str) -> Result<StrengthVector> {
    let values = parse_list::<f64>(text)?;
    StrengthVector::from_vec(values).with_context(|| format!("Invalid team: {:?}", text))
}

/// Format duration for display
pub fn format_duration(d: Duration) -> String {
    if d.as_secs() >= 60 {
        format!("{}m {:.1}s", d.as_secs() / 60, (d.as_secs() % 60) as f64 + d.subsec_millis() as f64 / 1000.0)
    } else if d.as_secs() >= 1 {
        format!("{:.2}s", d.as_secs_f64())
    } else if d.as_millis() >= 1 {
        format!("{:.1}ms", d.as_secs_f64() * 1000.0)
    } else {
        format!("{:.1}us", d.as_secs_f64() * 1_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_create_rng_seeded_is_deterministic() {
        let mut a = create_rng(Some(42));
        let mut b = create_rng(Some(42));
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_resolve_threads() {
        let available = available_threads();
        assert_eq!(resolve_threads(None).unwrap(), available);
        assert_eq!(resolve_threads(Some(1)).unwrap(), 1);
        assert!(resolve_threads(Some(0)).is_err());
        assert!(resolve_threads(Some(available + 1)).is_err());
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list::<f64>("1, 1.2,1.4").unwrap(), vec![1.0, 1.2, 1.4]);
        assert_eq!(parse_list::<usize>("5,6,7").unwrap(), vec![5, 6, 7]);
        assert!(parse_list::<usize>("5,x").is_err());
    }

    #[test]
    fn test_parse_team() {
        let team = parse_team("0.2,0.3,0.5").unwrap();
        assert_eq!(team.len(), 3);
        assert!(parse_team("").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5.0s");
        assert_eq!(format_duration(Duration::from_micros(250)), "250.0us");
    }
}
