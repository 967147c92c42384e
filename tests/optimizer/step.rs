use bayes_opt::maximizer::AcquisitionMaximizer;
use bayes_opt::prelude::*;

use crate::{sum, unit_square};

/// Always proposes the same point, whatever the acquisition says.
struct Fixed(Vec<f64>);

impl AcquisitionMaximizer for Fixed {
    fn maximize(
        &self,
        _acquisition: &dyn AcquisitionFunction,
        _bounds: &Bounds,
        _rng: &mut fastrand::Rng,
    ) -> Result<Vec<f64>> {
        Ok(self.0.clone())
    }
}

fn stuck_at(point: [f64; 2]) -> BayesianOptimizer<fn(&Params) -> Result<f64>> {
    let mut opt = OptimizerBuilder::new(unit_square(), Matern::default())
        .seed(1)
        .maximizer(Fixed(point.to_vec()))
        .build(sum as fn(&Params) -> Result<f64>)
        .unwrap();
    let known: Params = [("a".to_owned(), 0.25), ("b".to_owned(), 0.25)]
        .into_iter()
        .collect();
    opt.initialize([(0.5, known)]).unwrap();
    opt.init(0).unwrap();
    opt
}

#[test]
fn step_requires_initialization() {
    let mut opt = OptimizerBuilder::new(unit_square(), Matern::default())
        .build(sum)
        .unwrap();
    assert!(matches!(opt.step(), Err(Error::NotInitialized)));
    assert!(opt.history().is_empty());
}

#[test]
fn step_evaluates_the_proposal() {
    let mut opt = stuck_at([0.75, 0.5]);
    let evaluation = opt.step().unwrap();

    assert_eq!(evaluation.params["a"], 0.75);
    assert_eq!(evaluation.params["b"], 0.5);
    assert_eq!(evaluation.value, 1.25);
    assert_eq!(opt.history().x()[1], vec![0.75, 0.5]);
}

#[test]
fn step_replaces_a_duplicate_proposal_with_a_random_point() {
    let mut opt = stuck_at([0.25, 0.25]);
    opt.step().unwrap();

    let history = opt.history();
    assert_eq!(history.len(), 2);
    assert_ne!(history.x()[1], vec![0.25, 0.25]);
    assert!(opt.bounds().contains(&history.x()[1]));
}

#[test]
fn maximize_evaluates_a_duplicate_proposal_as_is() {
    let mut opt = stuck_at([0.25, 0.25]);
    let result = opt.maximize(0, 2).unwrap();

    assert_eq!(result.all.len(), 2);
    assert!(
        result
            .all
            .iter()
            .all(|e| e.params["a"] == 0.25 && e.params["b"] == 0.25)
    );
    assert_eq!(opt.history().len(), 3);
}

#[test]
fn steps_accumulate_in_the_history() {
    let mut opt = stuck_at([0.9, 0.1]);
    for expected in 2..=4 {
        opt.step().unwrap();
        assert_eq!(opt.history().len(), expected);
    }
    assert!(
        opt.history().origins()[1..]
            .iter()
            .all(|&o| o == Origin::Iteration)
    );
}
