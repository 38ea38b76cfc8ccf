//! Estimate command - win probabilities for explicit teams

use anyhow::{bail, Context, Result};
use clap::Args;

use gladiator_core::{win_probabilities, win_probability, StrengthVector};

use crate::util::parse_team;

#[derive(Args)]
pub struct EstimateArgs {
    /// Team strengths, comma separated; repeat once per team
    #[arg(long = "team", value_name = "LIST", required = true)]
    pub teams: Vec<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
struct Estimate {
    /// Left-beats-right odds, two teams only
    pairwise: Option<f64>,
    /// Probability that each team is the last one standing
    joint: Vec<f64>,
}

/// Run estimate command
pub fn run(args: EstimateArgs) -> Result<()> {
    let teams = args
        .teams
        .iter()
        .map(|text| parse_team(text))
        .collect::<Result<Vec<_>>>()?;

    let estimate = estimate(&teams)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        if let Some(p) = estimate.pairwise {
            println!("Probability of win: {}", p);
        }
        for (i, p) in estimate.joint.iter().enumerate() {
            println!("Team {}: {}", i, p);
        }
    }

    Ok(())
}

fn estimate(teams: &[StrengthVector]) -> Result<Estimate> {
    if teams.is_empty() {
        bail!("At least one --team is required");
    }

    let pairwise = match teams {
        [left, right] => Some(win_probability(left, right).context("Pairwise estimate failed")?),
        _ => None,
    };
    let joint = win_probabilities(teams).context("Joint estimate failed")?;

    Ok(Estimate { pairwise, joint })
}
