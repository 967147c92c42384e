//! The [`Objective`] trait defines what gets maximized.
//!
//! For simple closures, pass them directly to the optimizer:
//!
//! ```
//! use bayes_opt::prelude::*;
//!
//! let bounds = Bounds::new([("x", (-10.0, 10.0))]).unwrap();
//! let objective = |p: &Params| Ok::<_, Error>(-(p["x"] - 1.0).powi(2));
//! let optimizer = BayesianOptimizer::new(objective, bounds, Matern::default());
//! ```
//!
//! To observe progress, implement [`Objective`] on a struct and override
//! [`after_evaluation`](Objective::after_evaluation):
//!
//! ```
//! use std::cell::RefCell;
//!
//! use bayes_opt::prelude::*;
//!
//! struct Tracked {
//!     best_so_far: RefCell<Vec<f64>>,
//! }
//!
//! impl Objective for Tracked {
//!     type Error = Error;
//!
//!     fn evaluate(&self, params: &Params) -> Result<f64> {
//!         Ok(-(params["x"] - 1.0).powi(2))
//!     }
//!
//!     fn after_evaluation(&self, _evaluation: &Evaluation, best: &BestResult) {
//!         self.best_so_far.borrow_mut().push(best.value);
//!     }
//! }
//!
//! let bounds = Bounds::new([("x", (-10.0, 10.0))]).unwrap();
//! let tracked = Tracked { best_so_far: RefCell::new(Vec::new()) };
//! let mut optimizer = OptimizerBuilder::new(bounds, Matern::default())
//!     .seed(1)
//!     .maximizer(RandomSearch::new(200))
//!     .build(tracked)
//!     .unwrap();
//! optimizer.maximize(3, 2).unwrap();
//!
//! let seen = optimizer.objective().best_so_far.borrow();
//! assert_eq!(seen.len(), 5);
//! assert!(seen.windows(2).all(|w| w[0] <= w[1]));
//! ```

use crate::bounds::Params;
use crate::history::{BestResult, Evaluation};

/// An expensive scalar function of named parameters, to be maximized.
///
/// The only required method is [`evaluate`](Objective::evaluate). Any
/// closure `Fn(&Params) -> Result<f64, E>` with `E: ToString` implements
/// this trait.
pub trait Objective {
    /// The error type returned by [`evaluate`](Objective::evaluate).
    type Error: ToString;

    /// Evaluate the function at `params` (one entry per bounded parameter).
    ///
    /// # Errors
    ///
    /// Any error; the optimizer wraps it in
    /// [`Error::Objective`](crate::Error::Objective) and stops.
    fn evaluate(&self, params: &Params) -> Result<f64, Self::Error>;

    /// Called after each evaluation has been appended to the history, with
    /// the best result over the whole history at that moment.
    ///
    /// Default: does nothing.
    fn after_evaluation(&self, _evaluation: &Evaluation, _best: &BestResult) {}
}

impl<F, E> Objective for F
where
    F: Fn(&Params) -> Result<f64, E>,
    E: ToString,
{
    type Error = E;

    fn evaluate(&self, params: &Params) -> Result<f64, E> {
        self(params)
    }
}
