use std::cell::Cell;
use std::collections::HashMap;

use bayes_opt::prelude::*;

use crate::{quick, sum, unit_square};

fn columns(entries: &[(&str, &[f64])]) -> HashMap<String, Vec<f64>> {
    entries
        .iter()
        .map(|(name, values)| ((*name).to_owned(), values.to_vec()))
        .collect()
}

#[test]
fn explore_points_are_evaluated_first_in_order() {
    let mut opt = quick(unit_square(), sum);
    opt.explore(&columns(&[("a", &[0.1, 0.2, 0.3]), ("b", &[0.9, 0.8, 0.7])]))
        .unwrap();
    opt.init(2).unwrap();

    let history = opt.history();
    assert_eq!(history.len(), 5);
    assert_eq!(history.x()[0], vec![0.1, 0.9]);
    assert_eq!(history.x()[1], vec![0.2, 0.8]);
    assert_eq!(history.x()[2], vec![0.3, 0.7]);
    assert_eq!(&history.origins()[..3], [Origin::Explore; 3]);
    assert_eq!(&history.origins()[3..], [Origin::Random; 2]);
}

#[test]
fn length_mismatch_is_rejected_without_staging() {
    let mut opt = quick(unit_square(), sum);
    opt.explore(&columns(&[("a", &[0.5]), ("b", &[0.5])])).unwrap();

    let err = opt
        .explore(&columns(&[("a", &[0.1, 0.2]), ("b", &[0.1, 0.2, 0.3])]))
        .unwrap_err();
    match err {
        Error::ExploreLengthMismatch {
            name,
            expected,
            got,
        } => {
            assert_eq!(name, "b");
            assert_eq!(expected, 2);
            assert_eq!(got, 3);
        }
        other => panic!("unexpected error: {other}"),
    }

    // The earlier, valid staging survives.
    opt.init(0).unwrap();
    assert_eq!(opt.history().x(), [vec![0.5, 0.5]]);
}

#[test]
fn unknown_and_missing_names_are_rejected() {
    let mut opt = quick(unit_square(), sum);
    assert!(matches!(
        opt.explore(&columns(&[("a", &[0.1]), ("b", &[0.1]), ("c", &[0.1])])),
        Err(Error::UnknownParameter(name)) if name == "c"
    ));
    assert!(matches!(
        opt.explore(&columns(&[("a", &[0.1])])),
        Err(Error::MissingParameter(name)) if name == "b"
    ));
}

#[test]
fn later_explore_call_replaces_staged_points() {
    let mut opt = quick(unit_square(), sum);
    opt.explore(&columns(&[("a", &[0.1, 0.2]), ("b", &[0.1, 0.2])]))
        .unwrap();
    opt.explore(&columns(&[("a", &[0.7]), ("b", &[0.3])])).unwrap();
    opt.init(0).unwrap();

    assert_eq!(opt.history().x(), [vec![0.7, 0.3]]);
    assert_eq!(opt.history().y(), [1.0]);
}

#[test]
fn empty_columns_stage_nothing() {
    let mut opt = quick(unit_square(), sum);
    opt.explore(&columns(&[("a", &[]), ("b", &[])])).unwrap();
    opt.init(1).unwrap();
    assert_eq!(opt.history().origins(), [Origin::Random]);
}

#[test]
fn failed_init_keeps_unevaluated_explore_points_staged() {
    let calls = Cell::new(0);
    let objective = |p: &Params| {
        calls.set(calls.get() + 1);
        if calls.get() == 2 {
            Err("transient failure")
        } else {
            Ok(p["a"] + p["b"])
        }
    };
    let mut opt = quick(unit_square(), objective);
    opt.explore(&columns(&[("a", &[0.1, 0.2, 0.3]), ("b", &[0.0, 0.0, 0.0])]))
        .unwrap();

    assert!(matches!(opt.init(0), Err(Error::Objective(_))));
    assert_eq!(opt.history().x(), [vec![0.1, 0.0]]);
    assert!(!opt.is_initialized());

    opt.init(0).unwrap();
    assert_eq!(
        opt.history().x(),
        [vec![0.1, 0.0], vec![0.2, 0.0], vec![0.3, 0.0]]
    );
    assert_eq!(opt.history().origins(), [Origin::Explore; 3]);
}

#[test]
fn failure_on_the_first_explore_point_loses_nothing() {
    let calls = Cell::new(0);
    let objective = |p: &Params| {
        calls.set(calls.get() + 1);
        if calls.get() == 1 {
            Err("not ready")
        } else {
            Ok(p["a"])
        }
    };
    let mut opt = quick(unit_square(), objective);
    opt.explore(&columns(&[("a", &[0.1, 0.2, 0.3]), ("b", &[0.5, 0.5, 0.5])]))
        .unwrap();

    assert!(opt.init(0).is_err());
    assert!(opt.history().is_empty());

    opt.init(0).unwrap();
    assert_eq!(opt.history().len(), 3);
    assert_eq!(opt.history().y(), [0.1, 0.2, 0.3]);
}
