use std::cell::Cell;

use bayes_opt::prelude::*;

use crate::{quick, sum, unit_square};

fn params(a: f64, b: f64) -> Params {
    [("a".to_owned(), a), ("b".to_owned(), b)]
        .into_iter()
        .collect()
}

struct Counting {
    calls: Cell<usize>,
}

impl Objective for Counting {
    type Error = Error;

    fn evaluate(&self, p: &Params) -> Result<f64> {
        self.calls.set(self.calls.get() + 1);
        sum(p)
    }
}

#[test]
fn known_points_are_appended_after_evaluated_ones() {
    let mut opt = quick(unit_square(), sum);
    opt.initialize([(-1.0, params(0.2, 0.3)), (5.0, params(0.6, 0.4))])
        .unwrap();
    opt.init(2).unwrap();

    let history = opt.history();
    assert_eq!(
        history.origins(),
        [Origin::Random, Origin::Random, Origin::Known, Origin::Known]
    );
    assert_eq!(history.x()[2], vec![0.2, 0.3]);
    assert_eq!(history.y()[2], -1.0);
    assert_eq!(history.y()[3], 5.0);
}

#[test]
fn known_points_never_reach_the_objective() {
    let objective = Counting {
        calls: Cell::new(0),
    };
    let mut opt = quick(unit_square(), objective);
    opt.initialize([(3.0, params(0.5, 0.5))]).unwrap();
    opt.init(0).unwrap();

    assert_eq!(opt.objective().calls.get(), 0);
    assert_eq!(opt.history().len(), 1);
}

#[test]
fn known_points_count_for_best_but_not_for_the_log() {
    let mut opt = quick(unit_square(), sum);
    opt.initialize([(100.0, params(0.1, 0.1))]).unwrap();
    let result = opt.maximize(2, 1).unwrap();

    assert_eq!(result.max.value, 100.0);
    assert_eq!(result.max.params, params(0.1, 0.1));
    assert_eq!(result.all.len(), 3);
    assert!(result.all.iter().all(|e| e.origin != Origin::Known));
}

#[test]
fn known_points_alone_can_seed_the_surrogate() {
    let mut opt = quick(unit_square(), sum);
    opt.initialize([(0.4, params(0.2, 0.2)), (1.2, params(0.6, 0.6))])
        .unwrap();
    opt.init(0).unwrap();
    let evaluation = opt.step().unwrap();

    assert_eq!(evaluation.origin, Origin::Iteration);
    assert_eq!(opt.history().len(), 3);
}

#[test]
fn a_bad_point_stages_nothing() {
    let mut opt = quick(unit_square(), sum);
    let missing: Params = [("a".to_owned(), 0.5)].into_iter().collect();
    let err = opt
        .initialize([(1.0, params(0.1, 0.1)), (2.0, missing)])
        .unwrap_err();
    assert!(matches!(err, Error::MissingParameter(name) if name == "b"));

    opt.init(0).unwrap();
    assert!(opt.history().is_empty());
}

#[test]
fn repeated_calls_accumulate() {
    let mut opt = quick(unit_square(), sum);
    opt.initialize([(1.0, params(0.1, 0.1))]).unwrap();
    opt.initialize([(2.0, params(0.2, 0.2))]).unwrap();
    opt.init(0).unwrap();
    assert_eq!(opt.history().y(), [1.0, 2.0]);
}
