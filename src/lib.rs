#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Bayesian optimization for expensive black-box functions. A Gaussian
//! Process surrogate models the objective from the points evaluated so far.
//! An Upper Confidence Bound acquisition, maximized by differential
//! evolution, picks where to evaluate next.
//!
//! # Getting Started
//!
//! ```
//! use bayes_opt::prelude::*;
//!
//! let bounds = Bounds::new([("x", (-10.0, 10.0))]).unwrap();
//! let mut optimizer = OptimizerBuilder::new(bounds, Matern::default())
//!     .seed(42)
//!     .maximizer(DifferentialEvolution::builder().population_size(30).build())
//!     .build(|p: &Params| Ok::<_, Error>(-(p["x"] - 1.0).powi(2)))
//!     .unwrap();
//!
//! let result = optimizer.maximize(5, 10).unwrap();
//! println!("x = {:.4}, f(x) = {:.4}", result.max.params["x"], result.max.value);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`BayesianOptimizer`] | Own the history and run the initialize / fit / propose / evaluate loop. |
//! | [`Bounds`] | Name each parameter and its closed interval; fixes the dimension order. |
//! | [`Objective`] | The function being maximized. Closures work directly. |
//! | [`GaussianProcess`](gp::GaussianProcess) | Surrogate regression with a pluggable [`Kernel`](kernel::Kernel). |
//! | [`Ucb`](acquisition::Ucb) | Acquisition score `mean + kappa * std`. |
//! | [`AcquisitionMaximizer`](maximizer::AcquisitionMaximizer) | Finds the acquisition maximum inside the bounds. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on bounds, evaluations and results | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key optimization points | on |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod acquisition;
mod bounds;
mod error;
pub mod gp;
mod history;
pub mod kernel;
pub mod maximizer;
pub mod objective;
mod optimizer;
mod rng_util;

pub use bounds::{Bounds, ParamBound, Params};
pub use error::{Error, Result};
pub use history::{BestResult, Evaluation, History, OptimizationResult, Origin};
pub use objective::Objective;
pub use optimizer::{BayesianOptimizer, DEFAULT_REGULARIZATION, OptimizerBuilder};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use bayes_opt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::acquisition::{AcquisitionFunction, DEFAULT_KAPPA, Ucb};
    pub use crate::bounds::{Bounds, ParamBound, Params};
    pub use crate::error::{Error, Result};
    pub use crate::gp::GaussianProcess;
    pub use crate::history::{BestResult, Evaluation, History, OptimizationResult, Origin};
    pub use crate::kernel::{Kernel, Matern, Rbf, Smoothness};
    pub use crate::maximizer::{
        AcquisitionMaximizer, DEStrategy, DifferentialEvolution, DifferentialEvolutionBuilder,
        RandomSearch,
    };
    pub use crate::objective::Objective;
    pub use crate::optimizer::{BayesianOptimizer, OptimizerBuilder};
}
