use anyhow::Result;
use coinflip_utils::beta::BetaParameters;
use coinflip_utils::observation::Outcome;
use coinflip_utils::updater::PosteriorStep;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub n_observations: usize,
    pub n_heads: usize,
    pub prior: BetaParameters,
    pub posterior: BetaParameters,
    pub mean: f64,
    pub variance: f64,
    pub credible_mass: f64,
    pub credible_interval: (f64, f64),
}

pub fn write_trace(path: &Path, trace: &[PosteriorStep]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)?;
    writer.write_record(&[
        "step",
        "observation",
        "alpha",
        "beta",
        "mean",
        "variance",
        "standard_deviation",
    ])?;
    for step in trace {
        let observation = step
            .observation
            .map(|heads| Outcome::from(heads).to_code())
            .unwrap_or("");
        writer.write_record(&[
            step.step.to_string(),
            observation.to_string(),
            step.alpha.to_string(),
            step.beta.to_string(),
            format!("{:.6}", step.mean),
            format!("{:.8}", step.variance),
            format!("{:.8}", step.standard_deviation),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Long format density curves, one block of `grid_points` rows per step.
pub fn write_density_frames(path: &Path, posteriors: &[BetaParameters], grid_points: usize) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_path(path)?;
    writer.write_record(&["step", "x", "density"])?;
    for (step, posterior) in posteriors.iter().enumerate() {
        for (x, density) in posterior.density_grid(grid_points)? {
            writer.write_record(&[step.to_string(), format!("{:.6}", x), format!("{:.6}", density)])?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}
