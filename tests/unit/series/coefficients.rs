use std::f64::consts::PI;

use super::*;
use crate::quadrature::adaptive::AdaptiveQuadrature;
use crate::quadrature::{QuadratureError, QuadratureEstimate};

const TOL: f64 = 1e-6;

fn square(t: f64) -> f64 {
    t * t
}

fn ramp(t: f64) -> f64 {
    t
}

#[test]
fn offset_of_linear_ramp_is_its_mean() {
    let q = AdaptiveQuadrature::default();
    let limits = Interval::new(0.0, 4.0).unwrap();
    let a0 = offset(&q, &|t| 2.0 * t + 3.0, limits.half_period(), limits).unwrap();
    assert!((a0 - 7.0).abs() < TOL, "a0 = {a0}");
}

#[test]
fn offset_of_square_on_symmetric_pi() {
    let q = AdaptiveQuadrature::default();
    let limits = Interval::SYMMETRIC_PI;
    let a0 = offset(&q, &square, limits.half_period(), limits).unwrap();
    assert!((a0 - PI * PI / 3.0).abs() < TOL, "a0 = {a0}");
}

#[test]
fn square_coefficients_match_closed_form() {
    let q = AdaptiveQuadrature::default();
    let limits = Interval::SYMMETRIC_PI;
    let h = limits.half_period();
    for k in 1..=12u32 {
        let c = coefficients(&q, k, &square, h, limits).unwrap();
        let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        let expected = 4.0 * sign / f64::from(k * k);
        assert!((c.cosine - expected).abs() < TOL, "a_{k} = {}", c.cosine);
    }
}

#[test]
fn even_function_has_no_sine_terms() {
    let q = AdaptiveQuadrature::default();
    let limits = Interval::SYMMETRIC_PI;
    for k in 1..=10 {
        let b = sine_coefficient(&q, k, &square, limits.half_period(), limits).unwrap();
        assert!(b.abs() < TOL, "b_{k} = {b}");
    }
}

#[test]
fn odd_function_has_no_cosine_terms() {
    let q = AdaptiveQuadrature::default();
    let limits = Interval::new(-2.0, 2.0).unwrap();
    let h = limits.half_period();
    for k in 1..=10 {
        let a = cosine_coefficient(&q, k, &ramp, h, limits).unwrap();
        assert!(a.abs() < TOL, "a_{k} = {a}");
    }
    // b_k of t on [-h, h] is 2h(-1)^(k+1)/(kπ)
    let b1 = sine_coefficient(&q, 1, &ramp, h, limits).unwrap();
    assert!((b1 - 2.0 * h / PI).abs() < TOL, "b_1 = {b1}");
}

#[test]
fn zero_harmonic_is_rejected() {
    let q = AdaptiveQuadrature::default();
    let limits = Interval::SYMMETRIC_PI;
    let err = cosine_coefficient(&q, 0, &square, limits.half_period(), limits).unwrap_err();
    assert!(matches!(err, FourierError::InvalidHarmonicCount(0)));
    assert!(sine_coefficient(&q, 0, &square, limits.half_period(), limits).is_err());
}

#[test]
fn bad_half_period_is_rejected() {
    let q = AdaptiveQuadrature::default();
    let limits = Interval::SYMMETRIC_PI;
    assert!(matches!(
        offset(&q, &square, 0.0, limits),
        Err(FourierError::Validation(_))
    ));
    assert!(cosine_coefficient(&q, 1, &square, f64::NAN, limits).is_err());
}

struct FailingQuadrature;

impl Quadrature for FailingQuadrature {
    fn integrate(
        &self,
        _integrand: &dyn Fn(f64) -> f64,
        _limits: Interval,
    ) -> Result<QuadratureEstimate, QuadratureError> {
        Err(QuadratureError::MaxSubdivisions {
            limit: 0,
            abs_error: 1.0,
        })
    }
}

#[test]
fn quadrature_failure_propagates() {
    let limits = Interval::SYMMETRIC_PI;
    let err = offset(&FailingQuadrature, &square, limits.half_period(), limits).unwrap_err();
    assert!(matches!(
        err,
        FourierError::IntegrationFailure(QuadratureError::MaxSubdivisions { .. })
    ));
}

#[test]
fn integrands_are_pure_functions_of_their_inputs() {
    let h = PI;
    assert_eq!(cosine_integrand(&square, 1, h, 0.0), 0.0);
    assert!((cosine_integrand(&square, 2, h, 1.0) - (2.0f64).cos()).abs() < 1e-15);
    assert!((sine_integrand(&ramp, 1, h, PI / 2.0) - PI / 2.0).abs() < 1e-15);
}

#[test]
fn term_at_origin_is_cosine_coefficient() {
    let c = CoefficientSet {
        k: 3,
        cosine: -0.5,
        sine: 7.0,
    };
    assert_eq!(c.term(PI, 0.0), -0.5);
}

#[test]
fn square_on_wide_interval_has_vanishing_sine_terms() {
    let q = AdaptiveQuadrature::default();
    let limits = Interval::new(-1000.0, 1000.0).unwrap();
    let h = limits.half_period();

    let b1 = sine_coefficient(&q, 1, &square, h, limits).unwrap();
    assert!(b1.abs() < TOL, "b1 = {b1}");

    // a_k = 4h²(-1)^k / (π²k²)
    let a1 = cosine_coefficient(&q, 1, &square, h, limits).unwrap();
    let expected = -4.0 * h * h / (PI * PI);
    assert!(((a1 - expected) / expected).abs() < 1e-8, "a1 = {a1}");
}
