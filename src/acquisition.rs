//! Acquisition functions.
//!
//! An acquisition function scores candidate points by trading off the
//! surrogate's predicted value against its uncertainty. The optimizer
//! evaluates the objective next wherever the acquisition is highest.

use crate::error::Result;
use crate::gp::GaussianProcess;
use crate::kernel::Kernel;

/// Default UCB exploration weight, the one-sided 99% normal quantile.
pub const DEFAULT_KAPPA: f64 = 2.576;

/// Scores candidate points; higher is more promising.
pub trait AcquisitionFunction {
    /// Score the point `x` (in original, unnormalized coordinates).
    ///
    /// # Errors
    ///
    /// Propagates surrogate errors such as an unfitted model or a
    /// dimension mismatch.
    fn score(&self, x: &[f64]) -> Result<f64>;
}

impl<F> AcquisitionFunction for F
where
    F: Fn(&[f64]) -> Result<f64>,
{
    fn score(&self, x: &[f64]) -> Result<f64> {
        self(x)
    }
}

/// `mean + kappa * sqrt(variance)`, with negative variance clamped to zero.
///
/// Posterior variances can come out marginally negative from round-off;
/// clamping keeps the square root defined. At zero variance the result is
/// exactly `mean`.
#[must_use]
pub fn upper_confidence_bound(mean: f64, variance: f64, kappa: f64) -> f64 {
    mean + kappa * variance.max(0.0).sqrt()
}

/// Upper Confidence Bound over a fitted [`GaussianProcess`].
///
/// Larger `kappa` favours unexplored, high-variance regions; smaller
/// `kappa` exploits the current mean estimate.
pub struct Ucb<'a, K: Kernel> {
    surrogate: &'a GaussianProcess<K>,
    kappa: f64,
}

impl<'a, K: Kernel> Ucb<'a, K> {
    /// Wrap a surrogate with exploration weight `kappa`.
    #[must_use]
    pub fn new(surrogate: &'a GaussianProcess<K>, kappa: f64) -> Self {
        Self { surrogate, kappa }
    }

    /// The exploration weight.
    #[must_use]
    pub fn kappa(&self) -> f64 {
        self.kappa
    }
}

impl<K: Kernel> AcquisitionFunction for Ucb<'_, K> {
    fn score(&self, x: &[f64]) -> Result<f64> {
        let (mean, variance) = self.surrogate.predict_point(x)?;
        Ok(upper_confidence_bound(mean, variance, self.kappa))
    }
}
