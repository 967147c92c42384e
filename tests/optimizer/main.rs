#![allow(clippy::float_cmp)]

mod bounds;
mod explore;
mod initialize;
mod maximize;
mod step;

use bayes_opt::maximizer::RandomSearch;
use bayes_opt::prelude::*;

/// A small, seeded optimizer over `bounds` using random-search proposals.
pub(crate) fn quick<O: Objective>(bounds: Bounds, objective: O) -> BayesianOptimizer<O> {
    OptimizerBuilder::new(bounds, Matern::default())
        .seed(11)
        .maximizer(RandomSearch::new(200))
        .build(objective)
        .unwrap()
}

pub(crate) fn unit_square() -> Bounds {
    Bounds::new([("a", (0.0, 1.0)), ("b", (0.0, 1.0))]).unwrap()
}

pub(crate) fn sum(p: &Params) -> Result<f64> {
    Ok(p.values().sum())
}
