use clap::Parser;
use env_logger::Env;
use log::info;
use std::path::Path;

mod cli;
mod io;
mod walkthrough;

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
    info!("Created output directory: {}", args.out);

    walkthrough::coinflip(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
}
