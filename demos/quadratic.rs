//! Maximize a two-parameter function with a known peak at `(x, y) = (1, -2)`.
//!
//! A couple of hand-picked points are explored first and one observation
//! with an already known value is fed in, then the optimizer runs its
//! usual loop.
//!
//! Run with: `cargo run --example quadratic`

use std::collections::HashMap;

use bayes_opt::prelude::*;

fn main() -> Result<()> {
    let bounds = Bounds::new([("x", (-4.0, 4.0)), ("y", (-3.0, 3.0))])?;

    let mut optimizer = OptimizerBuilder::new(bounds, Matern::default())
        .kappa(2.576)
        .seed(2024)
        .build(|p: &Params| Ok::<_, Error>(-(p["x"] - 1.0).powi(2) - (p["y"] + 2.0).powi(2) + 1.0))?;

    // Points worth a look before anything random.
    let explore: HashMap<String, Vec<f64>> = [
        ("x".to_owned(), vec![-1.0, 3.0]),
        ("y".to_owned(), vec![0.0, 1.5]),
    ]
    .into_iter()
    .collect();
    optimizer.explore(&explore)?;

    // A previous run already measured this one.
    let known: Params = [("x".to_owned(), 0.0), ("y".to_owned(), 0.0)]
        .into_iter()
        .collect();
    optimizer.initialize([(-4.0, known)])?;

    let result = optimizer.maximize(3, 15)?;

    for (i, evaluation) in result.all.iter().enumerate() {
        println!(
            "{i:>3} {:<9} x = {:>7.4}  y = {:>7.4}  f = {:>8.4}",
            format!("{:?}", evaluation.origin),
            evaluation.params["x"],
            evaluation.params["y"],
            evaluation.value
        );
    }
    println!(
        "best: x = {:.4}, y = {:.4}, f = {:.4}",
        result.max.params["x"], result.max.params["y"], result.max.value
    );
    Ok(())
}
