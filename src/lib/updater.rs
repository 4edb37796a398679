//! Sequential conjugate updating of a Beta prior with coin flips.
//!
//! Beta is conjugate to the Bernoulli likelihood, so the posterior after any
//! prefix of the data is again a Beta distribution whose parameters are the
//! prior's plus the running head and tail counts. No sampling is involved.

use crate::beta::BetaParameters;
use crate::error::BetaError;
use crate::observation::count_heads;
use log::debug;
use serde::Serialize;

/// Posterior beliefs for every prefix of `observations`.
///
/// The result holds `observations.len() + 1` values; index 0 is the prior and
/// index `i` the belief after the first `i` flips. `prior` is valid by
/// construction, so the scan itself cannot fail.
pub fn update(prior: BetaParameters, observations: &[bool]) -> Vec<BetaParameters> {
    let mut posteriors = Vec::with_capacity(observations.len() + 1);
    posteriors.push(prior);
    let mut n_heads = 0;
    for (i, &heads) in observations.iter().enumerate() {
        if heads {
            n_heads += 1;
        }
        posteriors.push(prior.with_counts(n_heads, i + 1 - n_heads));
    }
    debug!(
        "Updated {} over {} observations ({} heads)",
        prior,
        observations.len(),
        n_heads
    );
    posteriors
}

/// Posterior beliefs from a raw prior pair. Fails with `InvalidParameter`
/// before any observation is read when either shape is not positive.
pub fn update_from_pair(alpha: f64, beta: f64, observations: &[bool]) -> Result<Vec<BetaParameters>, BetaError> {
    Ok(update(BetaParameters::new(alpha, beta)?, observations))
}

/// Posterior after the first `i` observations, computed without the scan.
pub fn posterior_at(prior: BetaParameters, observations: &[bool], i: usize) -> Result<BetaParameters, BetaError> {
    if i > observations.len() {
        return Err(BetaError::invalid(
            "i",
            format!("prefix length {} exceeds {} observations", i, observations.len()),
        ));
    }
    let n_heads = count_heads(&observations[..i]);
    Ok(prior.with_counts(n_heads, i - n_heads))
}

/// One row of the posterior trace.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PosteriorStep {
    pub step: usize,
    /// The flip consumed to reach this step; `None` for the prior.
    pub observation: Option<bool>,
    pub alpha: f64,
    pub beta: f64,
    pub mean: f64,
    pub variance: f64,
    pub standard_deviation: f64,
}

impl PosteriorStep {
    fn new(step: usize, observation: Option<bool>, belief: &BetaParameters) -> Self {
        Self {
            step,
            observation,
            alpha: belief.alpha(),
            beta: belief.beta(),
            mean: belief.mean(),
            variance: belief.variance(),
            standard_deviation: belief.standard_deviation(),
        }
    }
}

pub fn posterior_trace(prior: BetaParameters, observations: &[bool]) -> Vec<PosteriorStep> {
    trace_from_posteriors(&update(prior, observations), observations)
}

/// Trace rows for beliefs already produced by [`update`] over `observations`.
pub fn trace_from_posteriors(posteriors: &[BetaParameters], observations: &[bool]) -> Vec<PosteriorStep> {
    posteriors
        .iter()
        .enumerate()
        .map(|(step, belief)| {
            let observation = step.checked_sub(1).and_then(|i| observations.get(i).copied());
            PosteriorStep::new(step, observation, belief)
        })
        .collect()
}
