use bayes_opt::prelude::*;

use crate::{quick, sum, unit_square};

#[test]
fn update_changes_only_named_parameters() {
    let mut opt = quick(unit_square(), sum);
    opt.update_bounds([("b", (-3.0, -2.0))]).unwrap();

    let a = opt.bounds().get("a").unwrap();
    let b = opt.bounds().get("b").unwrap();
    assert_eq!((a.low, a.high), (0.0, 1.0));
    assert_eq!((b.low, b.high), (-3.0, -2.0));
}

#[test]
fn proposals_follow_the_new_bounds_while_history_stays() {
    let mut opt = quick(unit_square(), sum);
    opt.init(4).unwrap();
    let before = opt.history().x().to_vec();

    opt.update_bounds([("a", (5.0, 6.0))]).unwrap();
    for _ in 0..3 {
        let evaluation = opt.step().unwrap();
        assert!((5.0..=6.0).contains(&evaluation.params["a"]));
        assert!((0.0..=1.0).contains(&evaluation.params["b"]));
    }

    assert_eq!(&opt.history().x()[..4], before.as_slice());
    assert!(!opt.bounds().contains(&opt.history().x()[0]));
}

#[test]
fn invalid_update_leaves_bounds_untouched() {
    let mut opt = quick(unit_square(), sum);

    let err = opt
        .update_bounds([("a", (0.0, 2.0)), ("z", (0.0, 1.0))])
        .unwrap_err();
    assert!(matches!(err, Error::UnknownParameter(name) if name == "z"));

    let err = opt
        .update_bounds([("a", (0.0, 2.0)), ("b", (1.0, 0.0))])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidBounds { .. }));

    assert_eq!(opt.bounds(), &unit_square());
}
