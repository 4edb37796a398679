// src/cli.rs
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "compare_samples",
    version,
    about = "Compare posterior samples against the closed-form Beta posterior"
)]
pub struct Cli {
    #[arg(
        long,
        value_name = "SAMPLES",
        help = "File with one posterior sample per line. Drawn from the exact posterior when absent"
    )]
    pub samples: Option<String>,

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

    #[arg(long, default_value = "42", help = "Seed for simulated flips and sampling")]
    pub seed: u64,

    #[arg(long, default_value = "1.0")]
    pub prior_alpha: f64,

    #[arg(long, default_value = "1.0")]
    pub prior_beta: f64,

    #[arg(long, default_value = "10000", help = "Number of sampler iterations")]
    pub iterations: usize,

    #[arg(long, default_value = "0.05", help = "Sampler step size")]
    pub step_size: f64,

    #[arg(long, default_value = "10", help = "Sampler leapfrog steps per iteration")]
    pub leapfrog_steps: usize,

    #[arg(long, default_value = "30", help = "Number of histogram bins")]
    pub bins: usize,

    #[arg(
        long,
        default_value = "0.01",
        help = "Largest accepted absolute error in the posterior mean"
    )]
    pub mean_tolerance: f64,

    #[arg(
        long,
        default_value = "0.1",
        help = "Largest accepted error in the posterior variance, as a fraction of the exact variance"
    )]
    pub variance_tolerance: f64,

    #[arg(
        long,
        short,
        default_value = "compare_samples",
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
