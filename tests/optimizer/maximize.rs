use std::cell::{Cell, RefCell};

use bayes_opt::prelude::*;

use crate::{quick, sum, unit_square};

fn parabola(p: &Params) -> Result<f64> {
    Ok(-(p["x"] - 1.0).powi(2))
}

#[test]
fn finds_the_peak_of_a_parabola() {
    let bounds = Bounds::new([("x", (-10.0, 10.0))]).unwrap();
    let mut opt = OptimizerBuilder::new(bounds, Matern::default())
        .seed(42)
        .build(parabola)
        .unwrap();

    let result = opt.maximize(5, 10).unwrap();

    assert_eq!(result.all.len(), 15);
    assert!(
        (result.max.params["x"] - 1.0).abs() < 0.5,
        "best x = {}",
        result.max.params["x"]
    );
}

#[test]
fn finds_the_peak_in_two_dimensions() {
    let bounds = Bounds::new([("x", (-5.0, 5.0)), ("y", (-5.0, 5.0))]).unwrap();
    let mut opt = OptimizerBuilder::new(bounds, Matern::default())
        .seed(9)
        .maximizer(
            DifferentialEvolution::builder()
                .population_size(30)
                .max_generations(100)
                .build(),
        )
        .build(|p: &Params| Ok::<_, Error>(-(p["x"] - 1.0).powi(2) - (p["y"] + 2.0).powi(2)))
        .unwrap();

    let result = opt.maximize(8, 20).unwrap();
    assert!(result.max.value > -0.5, "best value = {}", result.max.value);
}

#[test]
fn every_point_lies_inside_the_bounds() {
    let bounds = Bounds::new([("x", (-2.0, 3.0)), ("y", (10.0, 11.0))]).unwrap();
    let mut opt = OptimizerBuilder::new(bounds.clone(), Rbf::new(0.5))
        .seed(5)
        .kappa(10.0)
        .maximizer(DifferentialEvolution::builder().population_size(20).build())
        .build(|p: &Params| Ok::<_, Error>(p["x"].sin() * p["y"]))
        .unwrap();

    opt.maximize(3, 8).unwrap();
    assert!(opt.history().x().iter().all(|x| bounds.contains(x)));
}

#[test]
fn running_again_continues_from_the_history() {
    let mut opt = quick(unit_square(), sum);

    let first = opt.maximize(3, 2).unwrap();
    assert_eq!(first.all.len(), 5);

    // Already initialized: the init count is ignored.
    let second = opt.maximize(10, 2).unwrap();
    assert_eq!(second.all.len(), 7);
    assert_eq!(second.all[..5], first.all[..]);
    assert!(second.max.value >= first.max.value);
}

#[test]
fn zero_iterations_returns_the_initial_points() {
    let mut opt = quick(unit_square(), sum);
    let result = opt.maximize(4, 0).unwrap();

    assert_eq!(result.all.len(), 4);
    assert!(result.all.iter().all(|e| e.origin == Origin::Random));
    assert!(opt.surrogate().is_fitted());
}

struct Tracked {
    best: RefCell<Vec<f64>>,
    seen: RefCell<Vec<Origin>>,
}

impl Objective for Tracked {
    type Error = Error;

    fn evaluate(&self, p: &Params) -> Result<f64> {
        Ok((p["a"] * 7.0).sin() + p["b"])
    }

    fn after_evaluation(&self, evaluation: &Evaluation, best: &BestResult) {
        assert!(best.value >= evaluation.value);
        self.best.borrow_mut().push(best.value);
        self.seen.borrow_mut().push(evaluation.origin);
    }
}

#[test]
fn hook_sees_a_non_decreasing_best() {
    let tracked = Tracked {
        best: RefCell::new(Vec::new()),
        seen: RefCell::new(Vec::new()),
    };
    let mut opt = quick(unit_square(), tracked);
    let result = opt.maximize(4, 6).unwrap();

    let best = opt.objective().best.borrow();
    assert_eq!(best.len(), 10);
    assert!(best.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*best.last().unwrap(), result.max.value);

    let seen = opt.objective().seen.borrow();
    assert_eq!(&seen[..4], [Origin::Random; 4]);
    assert_eq!(&seen[4..], [Origin::Iteration; 6]);
}

#[test]
fn objective_failure_stops_the_run() {
    let calls = Cell::new(0);
    let objective = |p: &Params| {
        calls.set(calls.get() + 1);
        if calls.get() == 5 {
            Err("simulation diverged")
        } else {
            Ok(p["a"] + p["b"])
        }
    };
    let mut opt = quick(unit_square(), objective);

    let err = opt.maximize(3, 5).unwrap_err();
    match err {
        Error::Objective(message) => assert_eq!(message, "simulation diverged"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(opt.history().len(), 4);
    assert_eq!(calls.get(), 5);
}

#[test]
fn init_failure_keeps_the_points_evaluated_so_far() {
    let calls = Cell::new(0);
    let objective = |p: &Params| {
        calls.set(calls.get() + 1);
        if calls.get() > 2 {
            Err(format!("call {} rejected", calls.get()))
        } else {
            Ok(p["a"])
        }
    };
    let mut opt = quick(unit_square(), objective);

    assert!(matches!(opt.init(5), Err(Error::Objective(_))));
    assert_eq!(opt.history().len(), 2);
    assert!(!opt.is_initialized());
}

#[test]
fn empty_first_run_does_not_block_later_seeding() {
    let mut opt = quick(unit_square(), sum);

    assert!(matches!(opt.maximize(0, 3), Err(Error::NoObservations)));
    assert!(opt.history().is_empty());

    let result = opt.maximize(5, 3).unwrap();
    assert_eq!(result.all.len(), 8);
    assert_eq!(&opt.history().origins()[..5], [Origin::Random; 5]);
}
