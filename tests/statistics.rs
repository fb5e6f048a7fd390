use signal_glue::data::statistics::Summary;
use signal_glue::Statistics;

#[test]
fn empty_or_absent_is_not_applicable() {
    assert_eq!(Statistics::of(&[]), Statistics::NotApplicable);
    assert_eq!(Statistics::of_optional(None), Statistics::NotApplicable);
    assert!(Statistics::NotApplicable.lines().is_empty());
    assert!(Statistics::NotApplicable.summary().is_none());
}

#[test]
fn constant_signal() {
    let s = Statistics::of(&[3.0, 3.0, 3.0]);
    assert_eq!(
        s,
        Statistics::Summary(Summary {
            mean: 3.0,
            std: 0.0,
            min: 3.0,
            max: 3.0,
            count: 3,
        })
    );
}

#[test]
fn population_std_rounded_to_two_places() {
    // Population std of [1, 2, 3, 4] is sqrt(1.25) = 1.1180...
    let s = Statistics::of_optional(Some(&[1.0, 2.0, 3.0, 4.0]));
    let sum = s.summary().unwrap();
    assert_eq!(sum.mean, 2.5);
    assert_eq!(sum.std, 1.12);
    assert_eq!(sum.min, 1.0);
    assert_eq!(sum.max, 4.0);
    assert_eq!(sum.count, 4);
}

#[test]
fn precision_is_configurable() {
    let s = Statistics::with_precision(&[0.0, 1.0, 1.0], 4);
    assert_eq!(s.summary().unwrap().mean, 0.6667);
    let s = Statistics::with_precision(&[0.0, 1.0, 1.0], 0);
    assert_eq!(s.summary().unwrap().mean, 1.0);
}

#[test]
fn lines_are_labelled() {
    let lines = Statistics::of(&[1.0, -1.0]).lines();
    assert_eq!(
        lines,
        vec!["mean: 0", "std: 1", "min: -1", "max: 1", "samples: 2"]
    );
}

#[test]
fn halves_round_to_even() {
    assert_eq!(Statistics::of(&[0.125]).summary().unwrap().mean, 0.12);
    assert_eq!(Statistics::of(&[0.375]).summary().unwrap().mean, 0.38);
    assert_eq!(Statistics::with_precision(&[2.5], 0).summary().unwrap().max, 2.0);
}

#[test]
fn nan_sample_poisons_every_field() {
    for samples in [vec![f64::NAN, f64::NAN], vec![1.0, f64::NAN, 3.0]] {
        let s = Statistics::of(&samples);
        let sum = s.summary().unwrap();
        assert!(sum.mean.is_nan());
        assert!(sum.std.is_nan());
        assert!(sum.min.is_nan());
        assert!(sum.max.is_nan());
        assert_eq!(sum.count, samples.len());
        assert_eq!(s.lines()[2], "min: NaN");
    }
}

#[test]
fn huge_precision_is_capped() {
    let s = Statistics::with_precision(&[1.0, 2.0], u32::MAX);
    let sum = s.summary().unwrap();
    assert_eq!(sum.mean, 1.5);
    assert_eq!(sum.std, 0.5);
    let third = Statistics::with_precision(&[1.0 / 3.0], 400).summary().unwrap().mean;
    assert!(third.is_finite());
    assert!((third - 1.0 / 3.0).abs() < 1e-14);
}
