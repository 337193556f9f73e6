use std::f64::consts::PI;

use super::*;

fn interval(a: f64, b: f64) -> Interval {
    Interval::new(a, b).unwrap()
}

#[test]
fn polynomials_are_integrated_to_tolerance() {
    let q = AdaptiveQuadrature::default();

    let est = q.integrate(&|x| x * x, interval(-PI, PI)).unwrap();
    assert!((est.value - 2.0 * PI.powi(3) / 3.0).abs() < 1e-10);
    assert_eq!(est.stats.subdivisions, 0);
    assert_eq!(est.stats.fn_evals, 15);

    let est = q
        .integrate(&|x| 3.0 * x.powi(4) - x + 2.0, interval(0.0, 2.0))
        .unwrap();
    // 3 * 32/5 - 2 + 4
    assert!((est.value - 21.2).abs() < 1e-10);
}

#[test]
fn sine_over_half_period() {
    let q = AdaptiveQuadrature::default();
    let est = q.integrate(&f64::sin, interval(0.0, PI)).unwrap();
    assert!((est.value - 2.0).abs() < 1e-10);
    assert!(est.abs_error < 1e-8);
}

#[test]
fn oscillatory_integrand_needs_subdivision() {
    let q = AdaptiveQuadrature::default();
    let est = q
        .integrate(&|x| x * x * (30.0 * x).cos(), interval(-PI, PI))
        .unwrap();
    // (1/π) ∫ t² cos(kt) dt = 4(-1)^k / k²
    assert!((est.value / PI - 4.0 / 900.0).abs() < 1e-8);
    assert!(est.stats.subdivisions > 0);
    assert_eq!(
        est.stats.fn_evals,
        15 + 30 * est.stats.subdivisions as u64
    );
}

#[test]
fn zero_integrand_converges_immediately() {
    let q = AdaptiveQuadrature::default();
    let est = q.integrate(&|_| 0.0, interval(-1.0, 1.0)).unwrap();
    assert_eq!(est.value, 0.0);
    assert_eq!(est.abs_error, 0.0);
}

#[test]
fn non_finite_integrand_is_reported() {
    let q = AdaptiveQuadrature::default();
    let err = q
        .integrate(&|x| if x > 0.5 { f64::NAN } else { x }, interval(0.0, 1.0))
        .unwrap_err();
    match err {
        QuadratureError::NonFinite { x } => assert!(x > 0.5),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn subdivision_limit_is_enforced() {
    let tol = Tolerances::new(1e-14, 0.0).unwrap();
    let q = AdaptiveQuadrature::new(tol).with_max_subdivisions(1);
    let err = q
        .integrate(&|x| (50.0 * x).cos() * x.exp(), interval(-PI, PI))
        .unwrap_err();
    assert!(matches!(
        err,
        QuadratureError::MaxSubdivisions { limit: 1, .. }
    ));
}

#[test]
fn tolerances_validate() {
    assert!(Tolerances::new(1e-8, 0.0).is_ok());
    assert!(Tolerances::new(0.0, 1e-8).is_ok());
    assert!(Tolerances::new(0.0, 0.0).is_err());
    assert!(Tolerances::new(-1.0, 1e-8).is_err());
    assert!(Tolerances::new(f64::NAN, 1e-8).is_err());
}

#[test]
fn zero_integral_on_wide_interval_stops_at_rounding_floor() {
    // The 1.49e-8 absolute target sits below the rounding floor of t² on [-1000, 1000].
    let q = AdaptiveQuadrature::default();
    let est = q
        .integrate(&|t| t * t * (t * PI / 1000.0).sin(), interval(-1000.0, 1000.0))
        .unwrap();
    assert!(est.value.abs() < 1e-3, "value = {}", est.value);
    assert!(est.abs_error > Tolerances::default().abs);
    assert!(est.stats.subdivisions < AdaptiveQuadrature::DEFAULT_MAX_SUBDIVISIONS);
}
