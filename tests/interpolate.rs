use signal_glue::data::interpolate::*;
use signal_glue::GlueError;

fn close(a: &[f64], b: &[f64], tol: f64) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() <= tol)
}

#[test]
fn short_input_is_returned_unchanged() {
    assert!(interpolate(&[], InterpolationOrder::Cubic).is_empty());
    assert_eq!(interpolate(&[4.2], InterpolationOrder::Quadratic), vec![4.2]);
}

#[test]
fn every_order_is_identity_at_integer_positions() {
    let gap = [4.0, 0.5, 7.0, -3.0, 2.5, 10.0];
    for order in InterpolationOrder::ALL {
        let out = interpolate(&gap, order);
        assert!(close(&out, &gap, 1e-9), "{order:?}: {out:?}");
    }
}

#[test]
fn linear_keeps_linearly_spaced_points() {
    let spaced = linspace(4.0, 10.0, 5);
    assert!(close(&spaced, &[4.0, 5.5, 7.0, 8.5, 10.0], 1e-12));
    assert!(close(&interpolate(&spaced, InterpolationOrder::Linear), &spaced, 1e-12));
}

#[test]
fn falls_back_to_linear_with_too_few_points() {
    let two = [1.0, 3.0];
    let fit = Interpolant::fit(&two, InterpolationOrder::Cubic).unwrap();
    assert_eq!(fit.order(), InterpolationOrder::Linear);
    assert!((fit.eval(0.5) - 2.0).abs() < 1e-12);

    let three = [0.0, 1.0, 4.0];
    let fit = Interpolant::fit(&three, InterpolationOrder::Cubic).unwrap();
    assert_eq!(fit.order(), InterpolationOrder::Linear);
    let fit = Interpolant::fit(&three, InterpolationOrder::Quadratic).unwrap();
    assert_eq!(fit.order(), InterpolationOrder::Quadratic);
}

#[test]
fn fallback_never_steps_up() {
    for n in 0..6 {
        for order in InterpolationOrder::ALL {
            assert!(order.feasible_for(n).degree() <= order.degree());
        }
    }
    assert_eq!(InterpolationOrder::Quadratic.feasible_for(2), InterpolationOrder::Linear);
}

#[test]
fn quadratic_extrapolates_past_the_ends() {
    let ys: Vec<f64> = (0..4).map(|i| (i * i) as f64).collect();
    let fit = Interpolant::fit(&ys, InterpolationOrder::Quadratic).unwrap();
    assert!((fit.eval(-1.0) - 1.0).abs() < 1e-9);
    assert!((fit.eval(4.0) - 16.0).abs() < 1e-9);
    assert!((fit.eval(1.5) - 2.25).abs() < 1e-9);
}

#[test]
fn non_finite_result_keeps_the_input() {
    let gap = [1.0, f64::INFINITY, 2.0, 3.0];
    let out = interpolate(&gap, InterpolationOrder::Cubic);
    assert_eq!(out, gap.to_vec());
}

#[test]
fn order_parses_from_degree() {
    assert_eq!(InterpolationOrder::try_from(2u8).unwrap(), InterpolationOrder::Quadratic);
    assert!(matches!(
        InterpolationOrder::try_from(4u8),
        Err(GlueError::InvalidOrder(4))
    ));
    assert_eq!(u8::from(InterpolationOrder::Cubic), 3);
    assert_eq!(InterpolationOrder::Linear.to_string(), "1");
}
