use crate::cli;
use crate::io::{load_samples, write_histogram, write_json};
use anyhow::Result;
use coinflip_utils::beta::BetaParameters;
use coinflip_utils::histogram::Histogram;
use coinflip_utils::observation::{read_observations, simulate_flips};
use coinflip_utils::sampler::{
    compare, CoinModel, ConjugateSampler, PosteriorSampler, SampleComparison, SampleSummary, SamplerConfig,
};
use log::info;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub n_observations: usize,
    pub sampler: Option<SamplerConfig>,
    pub summary: SampleSummary,
    pub comparison: SampleComparison,
}

pub fn compare_samples(args: &cli::Cli) -> Result<ComparisonReport> {
    let prior = BetaParameters::new(args.prior_alpha, args.prior_beta)?;
    let observations = match &args.observations {
        Some(path) => {
            info!("Loading observations from: {}", path);
            read_observations(Path::new(path))?
        }
        None => simulate_flips(args.n_flips, args.true_p, args.seed)?,
    };
    let model = CoinModel::new(prior, &observations);
    let posterior = model.posterior();
    info!("Closed-form posterior after {} flips: {}", observations.len(), posterior);

    let (samples, sampler) = match &args.samples {
        Some(path) => {
            info!("Loading posterior samples from: {}", path);
            (load_samples(Path::new(path))?, None)
        }
        None => {
            let config = SamplerConfig::new(args.iterations, args.step_size, args.leapfrog_steps)?;
            info!("Drawing {} samples from the exact posterior", config.iterations);
            let samples = ConjugateSampler::new(args.seed).sample(&model, &config)?;
            (samples, Some(config))
        }
    };

    let summary = SampleSummary::from_samples(&samples)?;
    let comparison = compare(posterior, &summary, args.mean_tolerance, args.variance_tolerance)?;
    let histogram = Histogram::from_samples(&samples, args.bins)?;
    let overlay = histogram.overlay(&posterior)?;

    let outdir = Path::new(&args.out);
    write_histogram(&outdir.join("histogram.tsv"), &histogram, &overlay)?;
    let report = ComparisonReport {
        n_observations: observations.len(),
        sampler,
        summary,
        comparison,
    };
    write_json(&outdir.join("comparison.json"), &report)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::io::Write;

    #[test]
    fn test_compare_with_exact_sampler() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_str().unwrap();
        let args = cli::Cli::parse_from(["compare_samples", "--iterations", "20000", "--bins", "10", "-o", out]);
        let report = compare_samples(&args).unwrap();
        assert!(report.comparison.within_tolerance);
        assert_eq!(report.summary.count, 20_000);
        assert!(report.sampler.is_some());
        let histogram = fs::read_to_string(dir.path().join("histogram.tsv")).unwrap();
        assert_eq!(histogram.lines().count(), 11);
        assert!(dir.path().join("comparison.json").exists());
    }

    #[test]
    fn test_compare_with_external_samples() {
        let dir = tempfile::tempdir().unwrap();
        let flips = dir.path().join("flips.txt");
        writeln!(fs::File::create(&flips).unwrap(), "1 0 1 1 0").unwrap();
        let samples = dir.path().join("samples.txt");
        let mut file = fs::File::create(&samples).unwrap();
        for s in [0.1, 0.2, 0.3] {
            writeln!(file, "{}", s).unwrap();
        }
        let args = cli::Cli::parse_from([
            "compare_samples",
            "--observations",
            flips.to_str().unwrap(),
            "--samples",
            samples.to_str().unwrap(),
            "-o",
            dir.path().to_str().unwrap(),
        ]);
        let report = compare_samples(&args).unwrap();
        assert!(report.sampler.is_none());
        assert_eq!(report.n_observations, 5);
        assert_eq!(report.comparison.posterior, BetaParameters::new(4.0, 3.0).unwrap());
        assert!(!report.comparison.within_tolerance);
    }

    #[test]
    fn test_collapsed_external_chain_fails() {
        let dir = tempfile::tempdir().unwrap();
        let flips = dir.path().join("flips.txt");
        writeln!(fs::File::create(&flips).unwrap(), "1 0 1 1 0").unwrap();
        let samples = dir.path().join("samples.txt");
        let mut file = fs::File::create(&samples).unwrap();
        for _ in 0..1000 {
            writeln!(file, "{}", 4.0 / 7.0).unwrap();
        }
        let args = cli::Cli::parse_from([
            "compare_samples",
            "--observations",
            flips.to_str().unwrap(),
            "--samples",
            samples.to_str().unwrap(),
            "-o",
            dir.path().to_str().unwrap(),
        ]);
        let report = compare_samples(&args).unwrap();
        assert!(report.comparison.mean_error < 1e-9);
        assert!(!report.comparison.within_tolerance);
    }

    #[test]
    fn test_out_of_range_external_samples_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let samples = dir.path().join("samples.txt");
        writeln!(fs::File::create(&samples).unwrap(), "0.5\n1.2\n0.6").unwrap();
        let args = cli::Cli::parse_from([
            "compare_samples",
            "--samples",
            samples.to_str().unwrap(),
            "-o",
            dir.path().to_str().unwrap(),
        ]);
        let err = compare_samples(&args).unwrap_err();
        assert!(err.to_string().contains("outside of [0, 1]"));
        assert!(!dir.path().join("comparison.json").exists());
    }

    #[test]
    fn test_invalid_sampler_config() {
        let dir = tempfile::tempdir().unwrap();
        let args = cli::Cli::parse_from([
            "compare_samples",
            "--step-size",
            "0",
            "-o",
            dir.path().to_str().unwrap(),
        ]);
        assert!(compare_samples(&args).is_err());
    }
}
