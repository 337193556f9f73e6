//! Fourier coefficients by numeric integration.
//!
//! With half-period `h` over limits `[a, b]`:
//!
//! - offset: `1/(2h) · ∫ f(x) dx`
//! - cosine: `1/h · ∫ f(x)·cos(k·x·π/h) dx`
//! - sine: `1/h · ∫ f(x)·sin(k·x·π/h) dx`
//!
//! Integrands are plain functions of their inputs so they can be evaluated and tested without a
//! quadrature routine.

use std::f64::consts::PI;

use crate::foundation::core::Interval;
use crate::foundation::error::{FourierError, FourierResult};
use crate::quadrature::Quadrature;

/// Cosine and sine coefficients of one harmonic.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CoefficientSet {
    /// Harmonic index, `>= 1`.
    pub k: u32,
    /// Cosine coefficient `a_k`.
    pub cosine: f64,
    /// Sine coefficient `b_k`.
    pub sine: f64,
}

impl CoefficientSet {
    /// Value of this harmonic's term at `x`.
    pub fn term(&self, half_period: f64, x: f64) -> f64 {
        let angle = harmonic_angle(self.k, half_period, x);
        self.cosine * angle.cos() + self.sine * angle.sin()
    }
}

/// `k·x·π/h`, the argument of the k-th harmonic.
pub fn harmonic_angle(k: u32, half_period: f64, x: f64) -> f64 {
    f64::from(k) * x * (PI / half_period)
}

/// `f(x)·cos(k·x·π/h)`
pub fn cosine_integrand(function: &dyn Fn(f64) -> f64, k: u32, half_period: f64, x: f64) -> f64 {
    function(x) * harmonic_angle(k, half_period, x).cos()
}

/// `f(x)·sin(k·x·π/h)`
pub fn sine_integrand(function: &dyn Fn(f64) -> f64, k: u32, half_period: f64, x: f64) -> f64 {
    function(x) * harmonic_angle(k, half_period, x).sin()
}

/// Zeroth coefficient: the mean of `function` over `limits` for `h = width/2`.
pub fn offset(
    quadrature: &dyn Quadrature,
    function: &dyn Fn(f64) -> f64,
    half_period: f64,
    limits: Interval,
) -> FourierResult<f64> {
    validate_half_period(half_period)?;
    let est = quadrature.integrate(function, limits)?;
    Ok(est.value / (2.0 * half_period))
}

/// Cosine coefficient `a_k` for `k >= 1`.
pub fn cosine_coefficient(
    quadrature: &dyn Quadrature,
    k: u32,
    function: &dyn Fn(f64) -> f64,
    half_period: f64,
    limits: Interval,
) -> FourierResult<f64> {
    validate_harmonic(k)?;
    validate_half_period(half_period)?;
    let est = quadrature.integrate(
        &|x| cosine_integrand(function, k, half_period, x),
        limits,
    )?;
    Ok(est.value / half_period)
}

/// Sine coefficient `b_k` for `k >= 1`.
pub fn sine_coefficient(
    quadrature: &dyn Quadrature,
    k: u32,
    function: &dyn Fn(f64) -> f64,
    half_period: f64,
    limits: Interval,
) -> FourierResult<f64> {
    validate_harmonic(k)?;
    validate_half_period(half_period)?;
    let est = quadrature.integrate(&|x| sine_integrand(function, k, half_period, x), limits)?;
    Ok(est.value / half_period)
}

/// Both coefficients of harmonic `k`.
pub fn coefficients(
    quadrature: &dyn Quadrature,
    k: u32,
    function: &dyn Fn(f64) -> f64,
    half_period: f64,
    limits: Interval,
) -> FourierResult<CoefficientSet> {
    Ok(CoefficientSet {
        k,
        cosine: cosine_coefficient(quadrature, k, function, half_period, limits)?,
        sine: sine_coefficient(quadrature, k, function, half_period, limits)?,
    })
}

fn validate_harmonic(k: u32) -> FourierResult<()> {
    if k == 0 {
        return Err(FourierError::InvalidHarmonicCount(0));
    }
    Ok(())
}

fn validate_half_period(half_period: f64) -> FourierResult<()> {
    if !half_period.is_finite() || half_period <= 0.0 {
        return Err(FourierError::validation(format!(
            "half period must be finite and > 0 (got {half_period})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/series/coefficients.rs"]
mod tests;
