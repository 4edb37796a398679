use crate::error::{check_shape, BetaError};
use serde::Serialize;
use statrs::distribution::{Beta as BetaDist, Continuous, ContinuousCDF};
use std::fmt;

/// Shape parameters of a Beta distribution, the belief about a coin's
/// probability of heads.
///
/// Both parameters are validated on construction, so every value of this type
/// describes a proper distribution. Updating never mutates: each observation
/// yields a new value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BetaParameters {
    alpha: f64,
    beta: f64,
}

impl BetaParameters {
    pub fn new(alpha: f64, beta: f64) -> Result<Self, BetaError> {
        Ok(Self {
            alpha: check_shape("alpha", alpha)?,
            beta: check_shape("beta", beta)?,
        })
    }

    /// The uniform prior, Beta(1, 1).
    pub fn uniform() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Belief after `n_heads` successes and `n_tails` failures.
    pub fn with_counts(&self, n_heads: usize, n_tails: usize) -> Self {
        Self {
            alpha: self.alpha + n_heads as f64,
            beta: self.beta + n_tails as f64,
        }
    }

    /// Belief after a single flip.
    pub fn observe(&self, heads: bool) -> Self {
        if heads {
            self.with_counts(1, 0)
        } else {
            self.with_counts(0, 1)
        }
    }

    /// Total pseudo-count, alpha + beta.
    pub fn concentration(&self) -> f64 {
        self.alpha + self.beta
    }

    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    pub fn variance(&self) -> f64 {
        let numerator = self.alpha * self.beta;
        let denominator = (self.alpha + self.beta).powi(2) * (self.alpha + self.beta + 1.0);
        numerator / denominator
    }

    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    fn distribution(&self) -> Result<BetaDist, BetaError> {
        BetaDist::new(self.alpha, self.beta).map_err(|e| BetaError::invalid("alpha/beta", e.to_string()))
    }

    /// Probability density at `x`. Only defined on [0, 1].
    pub fn density(&self, x: f64) -> Result<f64, BetaError> {
        check_unit_interval(x)?;
        Ok(self.distribution()?.pdf(x))
    }

    pub fn log_density(&self, x: f64) -> Result<f64, BetaError> {
        check_unit_interval(x)?;
        Ok(self.distribution()?.ln_pdf(x))
    }

    /// Equal-tailed interval holding `mass` of the probability.
    pub fn credible_interval(&self, mass: f64) -> Result<(f64, f64), BetaError> {
        if !(mass > 0.0 && mass < 1.0) {
            return Err(BetaError::invalid(
                "mass",
                format!("must lie strictly between 0 and 1, got {}", mass),
            ));
        }
        let dist = self.distribution()?;
        let tail = (1.0 - mass) / 2.0;
        Ok((dist.inverse_cdf(tail), dist.inverse_cdf(1.0 - tail)))
    }

    /// Density at `points` evenly spaced midpoints of (0, 1). Returns (x, density) pairs.
    pub fn density_grid(&self, points: usize) -> Result<Vec<(f64, f64)>, BetaError> {
        if points == 0 {
            return Err(BetaError::invalid("points", "grid needs at least one point"));
        }
        let dist = self.distribution()?;
        let width = 1.0 / points as f64;
        Ok((0..points)
            .map(|i| {
                let x = (i as f64 + 0.5) * width;
                (x, dist.pdf(x))
            })
            .collect())
    }
}

impl Default for BetaParameters {
    fn default() -> Self {
        Self::uniform()
    }
}

impl fmt::Display for BetaParameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Beta(α = {}, β = {})", self.alpha, self.beta)
    }
}

fn check_unit_interval(x: f64) -> Result<f64, BetaError> {
    if (0.0..=1.0).contains(&x) {
        Ok(x)
    } else {
        Err(BetaError::DomainError { x })
    }
}

/// Mean of Beta(alpha, beta) for a raw parameter pair.
pub fn mean(alpha: f64, beta: f64) -> Result<f64, BetaError> {
    Ok(BetaParameters::new(alpha, beta)?.mean())
}

/// Variance of Beta(alpha, beta) for a raw parameter pair.
pub fn variance(alpha: f64, beta: f64) -> Result<f64, BetaError> {
    Ok(BetaParameters::new(alpha, beta)?.variance())
}

/// Density of Beta(alpha, beta) at `x` for a raw parameter pair.
pub fn density(alpha: f64, beta: f64, x: f64) -> Result<f64, BetaError> {
    BetaParameters::new(alpha, beta)?.density(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_new_rejects_non_positive() {
        assert!(BetaParameters::new(1.0, 1.0).is_ok());
        for (a, b) in vec![(0.0, 1.0), (1.0, 0.0), (-1.0, 2.0), (2.0, -0.5), (f64::NAN, 1.0)] {
            let result = BetaParameters::new(a, b);
            assert!(matches!(result, Err(BetaError::InvalidParameter { .. })), "{} {}", a, b);
        }
    }

    #[test]
    fn test_uniform_moments() {
        let b = BetaParameters::uniform();
        assert_eq!(b.mean(), 0.5);
        assert!((b.variance() - 1.0 / 12.0).abs() < EPS);
        assert!((b.standard_deviation() - (1.0f64 / 12.0).sqrt()).abs() < EPS);
    }

    #[test]
    fn test_four_three_moments() {
        let b = BetaParameters::new(4.0, 3.0).unwrap();
        assert!((b.mean() - 4.0 / 7.0).abs() < EPS);
        assert!((b.variance() - 12.0 / 392.0).abs() < EPS);
        assert_eq!(b.concentration(), 7.0);
    }

    #[test]
    fn test_observe_returns_new_value() {
        let prior = BetaParameters::uniform();
        let heads = prior.observe(true);
        let tails = prior.observe(false);
        assert_eq!(prior, BetaParameters::uniform());
        assert_eq!((heads.alpha(), heads.beta()), (2.0, 1.0));
        assert_eq!((tails.alpha(), tails.beta()), (1.0, 2.0));
        assert_eq!(prior.with_counts(3, 2), BetaParameters::new(4.0, 3.0).unwrap());
    }

    #[test]
    fn test_density() {
        let uniform = BetaParameters::uniform();
        for x in vec![0.1, 0.25, 0.5, 0.9] {
            assert!((uniform.density(x).unwrap() - 1.0).abs() < EPS);
        }
        // x^3 (1 - x)^2 / B(4, 3) with B(4, 3) = 1 / 60
        let b = BetaParameters::new(4.0, 3.0).unwrap();
        assert!((b.density(0.5).unwrap() - 1.875).abs() < 1e-8);
        assert!((b.log_density(0.5).unwrap() - 1.875f64.ln()).abs() < 1e-8);
        // Endpoints are inside the support.
        assert!(b.density(0.0).unwrap().abs() < 1e-12);
        assert!(b.density(1.0).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_density_outside_unit_interval() {
        let b = BetaParameters::uniform();
        assert_eq!(b.density(-0.1), Err(BetaError::DomainError { x: -0.1 }));
        assert_eq!(b.density(1.5), Err(BetaError::DomainError { x: 1.5 }));
        assert!(matches!(b.log_density(2.0), Err(BetaError::DomainError { .. })));
        assert!(matches!(b.density(f64::NAN), Err(BetaError::DomainError { .. })));
    }

    #[test]
    fn test_raw_pair_accessors() {
        assert!((mean(4.0, 3.0).unwrap() - 4.0 / 7.0).abs() < EPS);
        assert!((variance(1.0, 1.0).unwrap() - 1.0 / 12.0).abs() < EPS);
        assert!((density(1.0, 1.0, 0.3).unwrap() - 1.0).abs() < EPS);
        assert!(matches!(mean(0.0, 1.0), Err(BetaError::InvalidParameter { .. })));
        assert!(matches!(variance(1.0, -3.0), Err(BetaError::InvalidParameter { .. })));
        assert!(matches!(density(-1.0, 1.0, 0.5), Err(BetaError::InvalidParameter { .. })));
        assert!(matches!(density(1.0, 1.0, 1.01), Err(BetaError::DomainError { .. })));
    }

    #[test]
    fn test_credible_interval() {
        let uniform = BetaParameters::uniform();
        let (lower, upper) = uniform.credible_interval(0.9).unwrap();
        assert!((lower - 0.05).abs() < 1e-6);
        assert!((upper - 0.95).abs() < 1e-6);

        let b = BetaParameters::new(40.0, 30.0).unwrap();
        let (lower, upper) = b.credible_interval(0.95).unwrap();
        assert!(lower < b.mean() && b.mean() < upper);

        for mass in vec![0.0, 1.0, -0.5, 1.5] {
            assert!(matches!(b.credible_interval(mass), Err(BetaError::InvalidParameter { .. })));
        }
    }

    #[test]
    fn test_density_grid() {
        let grid = BetaParameters::uniform().density_grid(4).unwrap();
        let xs: Vec<f64> = grid.iter().map(|&(x, _)| x).collect();
        assert_eq!(xs, vec![0.125, 0.375, 0.625, 0.875]);
        assert!(grid.iter().all(|&(_, d)| (d - 1.0).abs() < EPS));

        // Midpoint rule should integrate close to one.
        let b = BetaParameters::new(4.0, 3.0).unwrap();
        let grid = b.density_grid(1000).unwrap();
        let area: f64 = grid.iter().map(|&(_, d)| d / 1000.0).sum();
        assert!((area - 1.0).abs() < 1e-4);

        assert!(BetaParameters::uniform().density_grid(0).is_err());
    }

    #[test]
    fn test_display() {
        let b = BetaParameters::new(4.0, 3.0).unwrap();
        assert_eq!(format!("{}", b), "Beta(α = 4, β = 3)");
    }
}
