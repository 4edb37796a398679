use crate::cli;
use crate::io::{write_density_frames, write_summary, write_trace, RunSummary};
use anyhow::Result;
use coinflip_utils::beta::BetaParameters;
use coinflip_utils::observation::{count_heads, read_observations, simulate_flips};
use coinflip_utils::updater::{trace_from_posteriors, update};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

pub fn load_or_simulate(args: &cli::Cli) -> Result<Vec<bool>> {
    match &args.observations {
        Some(path) => {
            info!("Loading observations from: {}", path);
            read_observations(Path::new(path))
        }
        None => {
            info!(
                "Simulating {} flips with p = {} (seed {})",
                args.n_flips, args.true_p, args.seed
            );
            Ok(simulate_flips(args.n_flips, args.true_p, args.seed)?)
        }
    }
}

pub fn coinflip(args: &cli::Cli) -> Result<RunSummary> {
    let global_timer = Instant::now();
    let prior = BetaParameters::new(args.prior_alpha, args.prior_beta)?;
    let observations = load_or_simulate(args)?;
    let n_heads = count_heads(&observations);
    info!(
        "Loaded {} observations ({} heads, {} tails)",
        observations.len(),
        n_heads,
        observations.len() - n_heads
    );

    let posteriors = update(prior, &observations);
    let posterior = *posteriors.last().unwrap_or(&prior);
    for (i, belief) in posteriors.iter().enumerate() {
        debug!("Step {}: {}, mean {:.4}", i, belief, belief.mean());
    }
    let credible_interval = posterior.credible_interval(args.credible_mass)?;
    info!(
        "Posterior {} with mean {:.4}, {:.0}% interval [{:.4}, {:.4}]",
        posterior,
        posterior.mean(),
        args.credible_mass * 100.0,
        credible_interval.0,
        credible_interval.1
    );

    let outdir = Path::new(&args.out);
    let trace = trace_from_posteriors(&posteriors, &observations);
    write_trace(&outdir.join("posterior_trace.tsv"), &trace)?;
    write_density_frames(&outdir.join("density_frames.tsv"), &posteriors, args.grid_points)?;

    let summary = RunSummary {
        n_observations: observations.len(),
        n_heads,
        prior,
        posterior,
        mean: posterior.mean(),
        variance: posterior.variance(),
        credible_mass: args.credible_mass,
        credible_interval,
    };
    write_summary(&outdir.join("summary.json"), &summary)?;
    info!("Finished in {:?}", global_timer.elapsed());
    Ok(summary)
}
