use crate::beta::BetaParameters;
use crate::error::BetaError;
use crate::observation::count_heads;
use itertools::Itertools;
use log::{debug, info};
use ordered_float::OrderedFloat;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use statrs::distribution::Beta as BetaDist;

/// Hyperparameters handed to a posterior sampler.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    pub iterations: usize,
    pub step_size: f64,
    pub leapfrog_steps: usize,
}

impl SamplerConfig {
    pub fn new(iterations: usize, step_size: f64, leapfrog_steps: usize) -> Result<Self, BetaError> {
        let config = Self {
            iterations,
            step_size,
            leapfrog_steps,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BetaError> {
        if self.iterations == 0 {
            return Err(BetaError::invalid("iterations", "must be > 0"));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(BetaError::invalid(
                "step_size",
                format!("must be > 0, got {}", self.step_size),
            ));
        }
        if self.leapfrog_steps == 0 {
            return Err(BetaError::invalid("leapfrog_steps", "must be > 0"));
        }
        Ok(())
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            step_size: 0.05,
            leapfrog_steps: 10,
        }
    }
}

/// A Beta prior on the probability of heads together with the observed flips.
#[derive(Clone, Debug)]
pub struct CoinModel<'a> {
    pub prior: BetaParameters,
    pub observations: &'a [bool],
}

impl<'a> CoinModel<'a> {
    pub fn new(prior: BetaParameters, observations: &'a [bool]) -> Self {
        Self { prior, observations }
    }

    /// The exact posterior after all observations.
    pub fn posterior(&self) -> BetaParameters {
        let n_heads = count_heads(self.observations);
        self.prior.with_counts(n_heads, self.observations.len() - n_heads)
    }
}

/// Anything that turns a coin model into draws from its posterior over the
/// probability of heads.
pub trait PosteriorSampler {
    fn sample(&mut self, model: &CoinModel, config: &SamplerConfig) -> Result<Vec<f64>, BetaError>;
}

/// Draws independent samples straight from the closed-form posterior.
///
/// Only `iterations` is used; the trajectory settings are validated and ignored.
pub struct ConjugateSampler {
    rng: StdRng,
}

impl ConjugateSampler {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PosteriorSampler for ConjugateSampler {
    fn sample(&mut self, model: &CoinModel, config: &SamplerConfig) -> Result<Vec<f64>, BetaError> {
        config.validate()?;
        let posterior = model.posterior();
        debug!("Sampling {} draws from {}", config.iterations, posterior);
        let dist = BetaDist::new(posterior.alpha(), posterior.beta())
            .map_err(|e| BetaError::invalid("alpha/beta", e.to_string()))?;
        Ok(dist.sample_iter(&mut self.rng).take(config.iterations).collect())
    }
}

/// Moments and quantiles of a set of posterior samples.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub variance: f64,
    pub q025: f64,
    pub median: f64,
    pub q975: f64,
}

impl SampleSummary {
    /// Samples are draws of a probability, so anything outside [0, 1] is rejected.
    pub fn from_samples(samples: &[f64]) -> Result<Self, BetaError> {
        if samples.is_empty() {
            return Err(BetaError::invalid("samples", "no samples to summarise"));
        }
        if let Some((i, bad)) = samples.iter().enumerate().find(|(_, s)| !(0.0..=1.0).contains(*s)) {
            return Err(BetaError::invalid(
                "samples",
                format!("sample {} is {}, outside of [0, 1]", i, bad),
            ));
        }
        let count = samples.len();
        let mean = samples.iter().sum::<f64>() / count as f64;
        let variance = if count > 1 {
            samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (count - 1) as f64
        } else {
            0.0
        };
        let sorted: Vec<f64> = samples
            .iter()
            .map(|&s| OrderedFloat(s))
            .sorted()
            .map(|s| s.into_inner())
            .collect();
        Ok(Self {
            count,
            mean,
            variance,
            q025: quantile(&sorted, 0.025),
            median: quantile(&sorted, 0.5),
            q975: quantile(&sorted, 0.975),
        })
    }
}

// Linear interpolation between closest ranks. `sorted` must be non-empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Closed-form posterior against a sample summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SampleComparison {
    pub posterior: BetaParameters,
    pub exact_mean: f64,
    pub exact_variance: f64,
    pub sample_mean: f64,
    pub sample_variance: f64,
    pub mean_error: f64,
    pub variance_error: f64,
    /// `variance_error` as a fraction of the exact variance.
    pub relative_variance_error: f64,
    pub mean_tolerance: f64,
    pub variance_tolerance: f64,
    pub within_tolerance: bool,
}

/// Check samples against the exact posterior.
///
/// The mean is held to an absolute band, the variance to a band relative to
/// the exact variance.
pub fn compare(
    posterior: BetaParameters,
    summary: &SampleSummary,
    mean_tolerance: f64,
    variance_tolerance: f64,
) -> Result<SampleComparison, BetaError> {
    for (name, value) in [("mean_tolerance", mean_tolerance), ("variance_tolerance", variance_tolerance)] {
        if !(value.is_finite() && value > 0.0) {
            return Err(BetaError::invalid(name, format!("must be > 0, got {}", value)));
        }
    }
    let mean_error = (summary.mean - posterior.mean()).abs();
    let variance_error = (summary.variance - posterior.variance()).abs();
    let relative_variance_error = variance_error / posterior.variance();
    let within_tolerance = mean_error <= mean_tolerance && relative_variance_error <= variance_tolerance;
    info!(
        "Sample mean {:.4} vs exact {:.4}, sample variance {:.6} vs exact {:.6}",
        summary.mean,
        posterior.mean(),
        summary.variance,
        posterior.variance()
    );
    Ok(SampleComparison {
        posterior,
        exact_mean: posterior.mean(),
        exact_variance: posterior.variance(),
        sample_mean: summary.mean,
        sample_variance: summary.variance,
        mean_error,
        variance_error,
        relative_variance_error,
        mean_tolerance,
        variance_tolerance,
        within_tolerance,
    })
}
