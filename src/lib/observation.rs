use crate::error::BetaError;
use anyhow::{bail, Result};
use log::debug;
use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::{fmt, str::FromStr};
use strum_macros::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Outcome {
    Heads,
    Tails,
}

impl Outcome {
    pub fn is_heads(&self) -> bool {
        matches!(self, Outcome::Heads)
    }

    pub fn to_code(&self) -> &'static str {
        match self {
            Outcome::Heads => "1",
            Outcome::Tails => "0",
        }
    }
}

impl From<bool> for Outcome {
    fn from(heads: bool) -> Self {
        if heads { Outcome::Heads } else { Outcome::Tails }
    }
}

impl From<Outcome> for bool {
    fn from(outcome: Outcome) -> Self {
        outcome.is_heads()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Heads => write!(f, "heads (1)"),
            Outcome::Tails => write!(f, "tails (0)"),
        }
    }
}

impl FromStr for Outcome {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "h" | "heads" | "true" => Ok(Outcome::Heads),
            "0" | "t" | "tails" | "false" => Ok(Outcome::Tails),
            _ => bail!("Invalid coin flip outcome: {}", s),
        }
    }
}

/// Number of heads in a dataset.
pub fn count_heads(observations: &[bool]) -> usize {
    observations.iter().filter(|&&heads| heads).count()
}

/// Draw `n` independent flips of a coin that lands heads with probability `p`.
///
/// The same seed always produces the same dataset.
pub fn simulate_flips(n: usize, p: f64, seed: u64) -> Result<Vec<bool>, BetaError> {
    let bernoulli = Bernoulli::new(p)
        .map_err(|_| BetaError::invalid("p", format!("must lie in [0, 1], got {}", p)))?;
    let mut rng = StdRng::seed_from_u64(seed);
    let flips: Vec<bool> = bernoulli.sample_iter(&mut rng).take(n).collect();
    debug!("Simulated {} flips with p = {}, {} heads", n, p, count_heads(&flips));
    Ok(flips)
}

/// Parse whitespace separated outcomes. Text after `#` on a line is ignored.
pub fn parse_observations<R: BufRead>(reader: R) -> Result<Vec<bool>> {
    let mut observations = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let content = line.split('#').next().unwrap_or("");
        for token in content.split_whitespace() {
            let outcome = token
                .parse::<Outcome>()
                .map_err(|e| anyhow::anyhow!("Line {}: {}", line_number + 1, e))?;
            observations.push(outcome.into());
        }
    }
    Ok(observations)
}

pub fn read_observations(path: &Path) -> Result<Vec<bool>> {
    let file = File::open(path)
        .map_err(|e| anyhow::anyhow!("Could not open observations file: {} ({})", path.display(), e))?;
    parse_observations(BufReader::new(file))
}
