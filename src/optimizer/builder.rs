use crate::acquisition::DEFAULT_KAPPA;
use crate::bounds::Bounds;
use crate::error::{Error, Result};
use crate::gp::GaussianProcess;
use crate::history::History;
use crate::kernel::Kernel;
use crate::maximizer::{AcquisitionMaximizer, DifferentialEvolution};
use crate::objective::Objective;

use super::BayesianOptimizer;

/// Default diagonal regularization added to the surrogate's kernel matrix.
pub const DEFAULT_REGULARIZATION: f64 = 1e-2;

/// A builder for [`BayesianOptimizer`] instances.
///
/// # Defaults
///
/// - kappa: [`DEFAULT_KAPPA`]
/// - regularization: [`DEFAULT_REGULARIZATION`]
/// - maximizer: [`DifferentialEvolution::default()`]
/// - verbose: off
/// - seed: drawn from the thread-local generator
///
/// # Examples
///
/// ```
/// use bayes_opt::prelude::*;
///
/// let bounds = Bounds::new([("x", (0.0, 1.0)), ("y", (-2.0, 2.0))]).unwrap();
/// let optimizer = OptimizerBuilder::new(bounds, Matern::default())
///     .kappa(1.0)
///     .regularization(1e-6)
///     .seed(42)
///     .maximizer(DifferentialEvolution::builder().population_size(30).build())
///     .build(|p: &Params| Ok::<_, Error>(p["x"] - p["y"].abs()))
///     .unwrap();
///
/// assert_eq!(optimizer.kappa(), 1.0);
/// assert!(!optimizer.is_initialized());
/// ```
pub struct OptimizerBuilder {
    bounds: Bounds,
    kernel: Box<dyn Kernel>,
    kappa: f64,
    regularization: f64,
    verbose: bool,
    seed: Option<u64>,
    maximizer: Option<Box<dyn AcquisitionMaximizer>>,
}

impl OptimizerBuilder {
    /// Start a builder over `bounds` using `kernel` for the surrogate.
    #[must_use]
    pub fn new(bounds: Bounds, kernel: impl Kernel + 'static) -> Self {
        Self {
            bounds,
            kernel: Box::new(kernel),
            kappa: DEFAULT_KAPPA,
            regularization: DEFAULT_REGULARIZATION,
            verbose: false,
            seed: None,
            maximizer: None,
        }
    }

    /// Set the UCB exploration weight.
    #[must_use]
    pub fn kappa(mut self, kappa: f64) -> Self {
        self.kappa = kappa;
        self
    }

    /// Set the ridge added to the kernel matrix diagonal before factorization.
    #[must_use]
    pub fn regularization(mut self, regularization: f64) -> Self {
        self.regularization = regularization;
        self
    }

    /// Emit an info-level event for every objective evaluation.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Seed the random source used for initial points, duplicate
    /// replacement and the acquisition maximizer.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the strategy used to maximize the acquisition function.
    #[must_use]
    pub fn maximizer(mut self, maximizer: impl AcquisitionMaximizer + 'static) -> Self {
        self.maximizer = Some(Box::new(maximizer));
        self
    }

    /// Build the optimizer around `objective`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKappa`] or [`Error::InvalidRegularization`]
    /// when either value is negative or not finite.
    pub fn build<O: Objective>(self, objective: O) -> Result<BayesianOptimizer<O>> {
        if !self.kappa.is_finite() || self.kappa < 0.0 {
            return Err(Error::InvalidKappa(self.kappa));
        }
        if !self.regularization.is_finite() || self.regularization < 0.0 {
            return Err(Error::InvalidRegularization(self.regularization));
        }
        Ok(self.assemble(objective))
    }

    /// Construct without validating; callers guarantee valid settings.
    pub(super) fn assemble<O: Objective>(self, objective: O) -> BayesianOptimizer<O> {
        let rng = self
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        let maximizer = self
            .maximizer
            .unwrap_or_else(|| Box::new(DifferentialEvolution::default()));

        BayesianOptimizer {
            objective,
            bounds: self.bounds,
            surrogate: GaussianProcess::new(self.kernel, self.regularization),
            maximizer,
            kappa: self.kappa,
            verbose: self.verbose,
            rng,
            history: History::default(),
            staged_explore: Vec::new(),
            staged_known: Vec::new(),
            initialized: false,
        }
    }
}
