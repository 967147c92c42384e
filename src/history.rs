//! Evaluation history and the results derived from it.
//!
//! [`History`] is the append-only record of every observation. The best
//! result and the evaluation log are never stored separately; they are
//! recomputed from the history whenever they are asked for.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bounds::{Bounds, Params};

/// How an observation entered the history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Origin {
    /// A user-chosen point evaluated during initialization.
    Explore,
    /// A uniformly sampled point evaluated during initialization.
    Random,
    /// A point whose value the user supplied; never evaluated.
    Known,
    /// A point proposed by the acquisition maximizer.
    Iteration,
}

/// One observation with named parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluation {
    /// Objective value.
    pub value: f64,
    /// Parameter values keyed by name.
    pub params: Params,
    /// How the point entered the history.
    pub origin: Origin,
}

/// The highest observed value and where it was observed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BestResult {
    /// Maximum objective value in the history.
    pub value: f64,
    /// Parameters of the first observation attaining `value`.
    pub params: Params,
}

/// Summary returned by [`BayesianOptimizer::maximize`](crate::BayesianOptimizer::maximize).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationResult {
    /// Best observation so far.
    pub max: BestResult,
    /// Every objective evaluation performed, in order. Points supplied
    /// with known values are not evaluations and are left out.
    pub all: Vec<Evaluation>,
}

/// Append-only, index-aligned observations: `y()[i]` was observed at `x()[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    xs: Vec<Vec<f64>>,
    ys: Vec<f64>,
    origins: Vec<Origin>,
}

impl History {
    pub(crate) fn push(&mut self, x: Vec<f64>, y: f64, origin: Origin) {
        self.xs.push(x);
        self.ys.push(y);
        self.origins.push(origin);
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ys.len()
    }

    /// Whether nothing has been observed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ys.is_empty()
    }

    /// Observed points, one per row, in dimension order.
    #[must_use]
    pub fn x(&self) -> &[Vec<f64>] {
        &self.xs
    }

    /// Observed values.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.ys
    }

    /// Origin of each observation.
    #[must_use]
    pub fn origins(&self) -> &[Origin] {
        &self.origins
    }

    /// Whether `x` equals an already observed point in every coordinate.
    #[must_use]
    pub fn contains(&self, x: &[f64]) -> bool {
        self.xs
            .iter()
            .any(|row| row.iter().zip(x).map(|(a, b)| (a - b).abs()).sum::<f64>() == 0.0)
    }

    /// Index of the maximum value; ties go to the earliest observation.
    /// NaN values never win.
    #[must_use]
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, &y) in self.ys.iter().enumerate() {
            if best.is_none_or(|b| y > self.ys[b]) && !y.is_nan() {
                best = Some(i);
            }
        }
        best
    }

    /// Label observation `i` with parameter names from `bounds`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn evaluation(&self, i: usize, bounds: &Bounds) -> Evaluation {
        Evaluation {
            value: self.ys[i],
            params: bounds.to_params(&self.xs[i]),
            origin: self.origins[i],
        }
    }

    /// Best observation, derived from the full history.
    #[must_use]
    pub fn best(&self, bounds: &Bounds) -> Option<BestResult> {
        self.best_index().map(|i| BestResult {
            value: self.ys[i],
            params: bounds.to_params(&self.xs[i]),
        })
    }

    /// Best observation plus the log of every evaluated (not known) point.
    #[must_use]
    pub fn result(&self, bounds: &Bounds) -> Option<OptimizationResult> {
        let max = self.best(bounds)?;
        let all = (0..self.len())
            .filter(|&i| self.origins[i] != Origin::Known)
            .map(|i| self.evaluation(i, bounds))
            .collect();
        Some(OptimizationResult { max, all })
    }
}
