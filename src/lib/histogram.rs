use crate::beta::BetaParameters;
use crate::error::BetaError;
use log::warn;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// Count scaled so the bins integrate to one over [0, 1].
    pub density: f64,
}

/// Equal-width histogram of posterior samples over [0, 1].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    pub dropped: usize,
}

impl Histogram {
    pub fn from_samples(samples: &[f64], n_bins: usize) -> Result<Self, BetaError> {
        if n_bins == 0 {
            return Err(BetaError::invalid("bins", "histogram needs at least one bin"));
        }
        let width = 1.0 / n_bins as f64;
        let mut counts = vec![0usize; n_bins];
        let mut dropped = 0;
        for &s in samples {
            if !(0.0..=1.0).contains(&s) {
                dropped += 1;
                continue;
            }
            // 1.0 falls into the last bin
            let index = ((s / width) as usize).min(n_bins - 1);
            counts[index] += 1;
        }
        if dropped > 0 {
            warn!("Dropped {} samples outside of [0, 1]", dropped);
        }

        let kept = samples.len() - dropped;
        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let density = if kept == 0 {
                    0.0
                } else {
                    count as f64 / (kept as f64 * width)
                };
                HistogramBin {
                    lower: i as f64 * width,
                    upper: (i + 1) as f64 * width,
                    count,
                    density,
                }
            })
            .collect();
        Ok(Self { bins, dropped })
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Closed-form density at each bin midpoint, for overlaying on the bars.
    pub fn overlay(&self, posterior: &BetaParameters) -> Result<Vec<f64>, BetaError> {
        self.bins
            .iter()
            .map(|b| posterior.density((b.lower + b.upper) / 2.0))
            .collect()
    }
}
