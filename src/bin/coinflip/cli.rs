use clap::{Parser, ValueEnum};

/// Sequential Bayesian updating of a coin's probability of heads.
#[derive(Parser, Debug)]
#[command(name = "coinflip", version, about = "Beta-Bernoulli posterior walkthrough")]
pub struct Cli {
    #[arg(
        long,
        value_name = "OBSERVATIONS",
        help = "File with coin flips (1/0, H/T, heads/tails). Simulated when absent"
    )]
    pub observations: Option<String>,

    #[arg(long, default_value = "100", help = "Number of flips to simulate")]
    pub n_flips: usize,

    #[arg(long, default_value = "0.7", help = "Probability of heads for simulated flips")]
    pub true_p: f64,

    #[arg(long, default_value = "42", help = "Seed for simulated flips")]
    pub seed: u64,

    #[arg(long, default_value = "1.0", help = "Prior alpha (pseudo-count of heads)")]
    pub prior_alpha: f64,

    #[arg(long, default_value = "1.0", help = "Prior beta (pseudo-count of tails)")]
    pub prior_beta: f64,

    #[arg(
        long,
        default_value = "100",
        help = "Number of points at which each posterior density is evaluated"
    )]
    pub grid_points: usize,

    #[arg(long, default_value = "0.95", help = "Mass of the reported credible interval")]
    pub credible_mass: f64,

    #[arg(
        long,
        short,
        default_value = "coinflip",
        value_name = "OUT",
        help = "Output directory"
    )]
    pub out: String,

    #[arg(
        value_enum,
        long,
        default_value = "normal",
        value_name = "VERBOSITY",
        help = "Verbosity level"
    )]
    pub verbosity: LogLevel,
}

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Verbose,
    Normal,
    Silent,
}

impl LogLevel {
    pub fn filter(&self) -> &'static str {
        match self {
            LogLevel::Verbose => "debug",
            LogLevel::Normal => "info",
            LogLevel::Silent => "off",
        }
    }
}
