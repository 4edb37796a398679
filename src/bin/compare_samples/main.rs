use clap::Parser;
use env_logger::Env;
use log::{info, warn};
use std::path::Path;

mod cli;
mod comparison;
mod io;

fn main() {
    let args = cli::Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.verbosity.filter())).init();

    // Create output directory
    let out_path = Path::new(&args.out);
    if out_path.exists() {
        eprintln!("Error: Output directory already exists: {}", args.out);
        std::process::exit(1);
    }
    if let Err(e) = std::fs::create_dir(out_path) {
        eprintln!("Error: Could not create output directory: {}", e);
        std::process::exit(1);
    }

    let report = comparison::compare_samples(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    if report.comparison.within_tolerance {
        info!("Samples agree with the closed-form posterior");
    } else {
        warn!(
            "Samples disagree with the closed-form posterior (mean error {:.4} > {} or relative variance error {:.3} > {})",
            report.comparison.mean_error,
            report.comparison.mean_tolerance,
            report.comparison.relative_variance_error,
            report.comparison.variance_tolerance
        );
        std::process::exit(2);
    }
}
