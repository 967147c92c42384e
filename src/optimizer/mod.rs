//! The Bayesian optimization loop.
//!
//! [`BayesianOptimizer`] owns the evaluation history and drives the
//! sequence: evaluate initial points, fit the Gaussian Process surrogate,
//! maximize the UCB acquisition to pick the next point, evaluate it, and
//! refit. Each phase is also exposed on its own ([`init`](BayesianOptimizer::init),
//! [`step`](BayesianOptimizer::step)) for callers who want to interleave
//! their own logic.

mod builder;

pub use builder::{DEFAULT_REGULARIZATION, OptimizerBuilder};

use std::collections::HashMap;

use crate::acquisition::Ucb;
use crate::bounds::{Bounds, Params};
use crate::error::{Error, Result};
use crate::gp::GaussianProcess;
use crate::history::{BestResult, Evaluation, History, OptimizationResult, Origin};
use crate::kernel::Kernel;
use crate::maximizer::AcquisitionMaximizer;
use crate::objective::Objective;
use crate::rng_util;

/// Maximizes an [`Objective`] over a box of named parameters.
///
/// The history only grows. Running [`maximize`](Self::maximize) twice
/// continues from the earlier observations instead of starting over.
///
/// # Examples
///
/// ```
/// use bayes_opt::prelude::*;
///
/// let bounds = Bounds::new([("x", (-4.0, 4.0))]).unwrap();
/// let mut optimizer = OptimizerBuilder::new(bounds, Matern::default())
///     .seed(7)
///     .maximizer(DifferentialEvolution::builder().population_size(20).build())
///     .build(|p: &Params| Ok::<_, Error>(-(p["x"] - 1.0).powi(2)))
///     .unwrap();
///
/// let result = optimizer.maximize(3, 5).unwrap();
/// assert_eq!(result.all.len(), 8);
/// assert!(result.max.value <= 0.0);
/// ```
pub struct BayesianOptimizer<O: Objective> {
    objective: O,
    bounds: Bounds,
    surrogate: GaussianProcess<Box<dyn Kernel>>,
    maximizer: Box<dyn AcquisitionMaximizer>,
    kappa: f64,
    verbose: bool,
    rng: fastrand::Rng,
    history: History,
    staged_explore: Vec<Vec<f64>>,
    staged_known: Vec<(Vec<f64>, f64)>,
    initialized: bool,
}

impl<O: Objective> BayesianOptimizer<O> {
    /// Create an optimizer with default settings.
    ///
    /// Use [`OptimizerBuilder`] to change kappa, regularization, the
    /// acquisition maximizer or the seed.
    #[must_use]
    pub fn new(objective: O, bounds: Bounds, kernel: impl Kernel + 'static) -> Self {
        OptimizerBuilder::new(bounds, kernel).assemble(objective)
    }

    /// The objective being maximized.
    #[must_use]
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// The current search box.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Every observation so far, in the order it was recorded.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The surrogate model, as of its last fit.
    #[must_use]
    pub fn surrogate(&self) -> &GaussianProcess<Box<dyn Kernel>> {
        &self.surrogate
    }

    /// The UCB exploration weight.
    #[must_use]
    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    /// Whether [`init`](Self::init) has completed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The best observation so far, or `None` before the first one.
    #[must_use]
    pub fn best(&self) -> Option<BestResult> {
        self.history.best(&self.bounds)
    }

    /// The best observation and the log of every evaluation.
    #[must_use]
    pub fn result(&self) -> Option<OptimizationResult> {
        self.history.result(&self.bounds)
    }

    /// Stage user-chosen points to evaluate during initialization.
    ///
    /// `points` maps every parameter name to a list of values; the `i`-th
    /// entries of all lists together form the `i`-th point. Staged points
    /// replace any staged by an earlier call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] or [`Error::MissingParameter`]
    /// when the keys differ from the bounded names, and
    /// [`Error::ExploreLengthMismatch`] when the lists differ in length.
    /// Nothing is staged on error.
    pub fn explore(&mut self, points: &HashMap<String, Vec<f64>>) -> Result<()> {
        if let Some(name) = points.keys().find(|name| self.bounds.get(name).is_none()) {
            return Err(Error::UnknownParameter(name.clone()));
        }

        let mut columns = Vec::with_capacity(self.bounds.len());
        for name in self.bounds.names() {
            let column = points
                .get(name)
                .ok_or_else(|| Error::MissingParameter(name.to_owned()))?;
            columns.push((name, column));
        }

        let expected = columns.first().map_or(0, |(_, c)| c.len());
        if let Some((name, column)) = columns.iter().find(|(_, c)| c.len() != expected) {
            return Err(Error::ExploreLengthMismatch {
                name: (*name).to_owned(),
                expected,
                got: column.len(),
            });
        }

        self.staged_explore = (0..expected)
            .map(|i| columns.iter().map(|(_, c)| c[i]).collect())
            .collect();
        trace_debug!(n_points = expected, "explore points staged");
        Ok(())
    }

    /// Supply observations whose objective values are already known.
    ///
    /// The points join the history during [`init`](Self::init), after the
    /// evaluated ones, without calling the objective. Repeated calls
    /// accumulate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] or [`Error::MissingParameter`]
    /// when a point's names differ from the bounded names. Nothing is
    /// staged on error.
    pub fn initialize<I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = (f64, Params)>,
    {
        let staged = points
            .into_iter()
            .map(|(value, params)| Ok((self.bounds.point_from_params(&params)?, value)))
            .collect::<Result<Vec<_>>>()?;
        trace_debug!(n_points = staged.len(), "known points staged");
        self.staged_known.extend(staged);
        Ok(())
    }

    /// Seed the history: evaluate staged explore points, then `n_random`
    /// uniform points, then append the known observations.
    ///
    /// Clears the staged points and marks the optimizer initialized.
    /// Calling it again appends another batch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Objective`] when an evaluation fails. Points
    /// evaluated before the failure stay in the history. Explore points not
    /// yet evaluated, including the failing one, stay staged, as do the
    /// known points; the random batch is drawn afresh on the next call.
    pub fn init(&mut self, n_random: usize) -> Result<()> {
        while let Some(x) = self.staged_explore.first().cloned() {
            self.evaluate(x, Origin::Explore)?;
            self.staged_explore.remove(0);
        }

        let random: Vec<Vec<f64>> = (0..n_random)
            .map(|_| rng_util::uniform_point(&mut self.rng, &self.bounds))
            .collect();
        for x in random {
            self.evaluate(x, Origin::Random)?;
        }

        for (x, value) in core::mem::take(&mut self.staged_known) {
            self.history.push(x, value, Origin::Known);
        }

        self.initialized = true;
        trace_debug!(n_observations = self.history.len(), "optimizer initialized");
        Ok(())
    }

    /// Replace the bounds of some parameters; others keep theirs.
    ///
    /// The history is not touched, even where it now lies outside the box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownParameter`] or [`Error::InvalidBounds`];
    /// the bounds are unchanged on error.
    pub fn update_bounds<I, S>(&mut self, partial: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, (f64, f64))>,
        S: Into<String>,
    {
        self.bounds.update(partial)
    }

    /// Run one acquisition-driven iteration: refit, propose, evaluate.
    ///
    /// A proposal that exactly repeats an observed point is replaced by a
    /// uniform random point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before [`init`](Self::init), and
    /// propagates surrogate, maximizer and objective errors.
    pub fn step(&mut self) -> Result<Evaluation> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        self.fit()?;

        let mut x = self.propose()?;
        if self.history.contains(&x) {
            trace_debug!("proposal repeats an observed point; sampling uniformly instead");
            x = rng_util::uniform_point(&mut self.rng, &self.bounds);
        }
        self.evaluate(x, Origin::Iteration)
    }

    /// Initialize if needed, then run `n_iter` acquisition-driven iterations.
    ///
    /// The surrogate is refit after every evaluation, so each proposal sees
    /// all observations so far. Once the history holds observations,
    /// `init_points` is ignored and iterations continue from the history.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoObservations`] when the history is still empty
    /// after initialization, and propagates surrogate, maximizer and
    /// objective errors.
    pub fn maximize(&mut self, init_points: usize, n_iter: usize) -> Result<OptimizationResult> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("maximize", init_points, n_iter).entered();

        // An init that produced no observations does not count.
        if !self.initialized || self.history.is_empty() {
            self.init(init_points)?;
        }
        if self.history.is_empty() {
            return Err(Error::NoObservations);
        }
        self.fit()?;

        for _iteration in 0..n_iter {
            let x = self.propose()?;
            if self.history.contains(&x) {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    iteration = _iteration,
                    "acquisition maximum repeats an observed point"
                );
            }
            self.evaluate(x, Origin::Iteration)?;
            self.fit()?;
        }

        self.result().ok_or(Error::NoObservations)
    }

    fn fit(&mut self) -> Result<()> {
        self.surrogate.fit(self.history.x(), self.history.y())
    }

    fn propose(&mut self) -> Result<Vec<f64>> {
        let ucb = Ucb::new(&self.surrogate, self.kappa);
        self.maximizer.maximize(&ucb, &self.bounds, &mut self.rng)
    }

    /// Evaluate the objective at `x`, record it, and notify the objective.
    fn evaluate(&mut self, x: Vec<f64>, origin: Origin) -> Result<Evaluation> {
        let params = self.bounds.to_params(&x);
        let value = self
            .objective
            .evaluate(&params)
            .map_err(|e| Error::Objective(e.to_string()))?;

        self.history.push(x, value, origin);
        let evaluation = Evaluation {
            value,
            params,
            origin,
        };

        if self.verbose {
            trace_info!(
                n = self.history.len(),
                value,
                origin = ?origin,
                params = ?evaluation.params,
                "objective evaluated"
            );
        }

        if let Some(best) = self.best() {
            self.objective.after_evaluation(&evaluation, &best);
        }
        Ok(evaluation)
    }
}
