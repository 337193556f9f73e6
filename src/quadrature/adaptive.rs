use crate::foundation::core::Interval;
use crate::foundation::error::{FourierError, FourierResult};
use crate::quadrature::kronrod::{HALF_NODES, WG, WGK, XGK};
use crate::quadrature::{Quadrature, QuadratureError, QuadratureEstimate, QuadratureStats};

/// Error targets for adaptive integration.
///
/// Integration stops once the estimated absolute error is `<= max(abs, rel * |result|)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerances {
    /// Absolute error target.
    pub abs: f64,
    /// Relative error target.
    pub rel: f64,
}

impl Tolerances {
    /// Build tolerances; both must be finite and non-negative, and at least one positive.
    pub fn new(abs: f64, rel: f64) -> FourierResult<Self> {
        let t = Self { abs, rel };
        t.validate()?;
        Ok(t)
    }

    /// Check the invariants of [`Tolerances::new`].
    pub fn validate(self) -> FourierResult<()> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if !ok(self.abs) || !ok(self.rel) {
            return Err(FourierError::validation(
                "quadrature tolerances must be finite and >= 0",
            ));
        }
        if self.abs == 0.0 && self.rel == 0.0 {
            return Err(FourierError::validation(
                "at least one quadrature tolerance must be > 0",
            ));
        }
        Ok(())
    }

    fn target(self, result: f64) -> f64 {
        self.abs.max(self.rel * result.abs())
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1.49e-8,
            rel: 1.49e-8,
        }
    }
}

/// Globally adaptive Gauss–Kronrod integrator.
///
/// The segment with the largest error estimate is bisected until the total estimate meets the
/// tolerance or `max_subdivisions` bisections have been spent.
#[derive(Clone, Debug, PartialEq)]
pub struct AdaptiveQuadrature {
    tol: Tolerances,
    /// Maximum number of bisections before giving up.
    pub max_subdivisions: usize,
}

impl AdaptiveQuadrature {
    /// Subdivision limit used by [`Default`].
    pub const DEFAULT_MAX_SUBDIVISIONS: usize = 200;

    /// Create an integrator with the given tolerances and the default subdivision limit.
    pub fn new(tol: Tolerances) -> Self {
        Self {
            tol,
            max_subdivisions: Self::DEFAULT_MAX_SUBDIVISIONS,
        }
    }

    /// Override the subdivision limit.
    pub fn with_max_subdivisions(mut self, max_subdivisions: usize) -> Self {
        self.max_subdivisions = max_subdivisions;
        self
    }

    /// Active tolerances.
    pub fn tolerances(&self) -> Tolerances {
        self.tol
    }
}

impl Default for AdaptiveQuadrature {
    fn default() -> Self {
        Self::new(Tolerances::default())
    }
}

impl Quadrature for AdaptiveQuadrature {
    fn integrate(
        &self,
        integrand: &dyn Fn(f64) -> f64,
        limits: Interval,
    ) -> Result<QuadratureEstimate, QuadratureError> {
        let mut stats = QuadratureStats::default();
        let first = gauss_kronrod_15(integrand, limits.lower(), limits.upper())?;
        stats.fn_evals += KRONROD_EVALS;

        let mut segments = vec![first];
        loop {
            let value: f64 = segments.iter().map(|s| s.value).sum();
            let abs_error: f64 = segments.iter().map(|s| s.abs_error).sum();
            let roundoff: f64 = segments.iter().map(|s| s.roundoff).sum();

            if abs_error <= self.tol.target(value) {
                tracing::trace!(
                    value,
                    abs_error,
                    subdivisions = stats.subdivisions,
                    "quadrature converged"
                );
                return Ok(QuadratureEstimate {
                    value,
                    abs_error,
                    stats,
                });
            }
            // Every segment sits at its rounding floor; bisecting cannot lower the estimate.
            if roundoff > 0.0 && abs_error <= roundoff {
                tracing::debug!(
                    value,
                    abs_error,
                    subdivisions = stats.subdivisions,
                    "quadrature limited by roundoff"
                );
                return Ok(QuadratureEstimate {
                    value,
                    abs_error,
                    stats,
                });
            }
            if stats.subdivisions >= self.max_subdivisions {
                return Err(QuadratureError::MaxSubdivisions {
                    limit: self.max_subdivisions,
                    abs_error,
                });
            }

            let worst = segments
                .iter()
                .enumerate()
                .max_by(|(_, x), (_, y)| x.abs_error.total_cmp(&y.abs_error))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let seg = segments.swap_remove(worst);

            let mid = 0.5 * (seg.a + seg.b);
            if !(seg.a < mid && mid < seg.b) {
                return Err(QuadratureError::Roundoff { a: seg.a, b: seg.b });
            }

            segments.push(gauss_kronrod_15(integrand, seg.a, mid)?);
            segments.push(gauss_kronrod_15(integrand, mid, seg.b)?);
            stats.fn_evals += 2 * KRONROD_EVALS;
            stats.subdivisions += 1;
        }
    }
}

const KRONROD_EVALS: u64 = 15;

#[derive(Clone, Copy, Debug)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    abs_error: f64,
    roundoff: f64,
}

fn eval(f: &dyn Fn(f64) -> f64, x: f64) -> Result<f64, QuadratureError> {
    let v = f(x);
    if v.is_finite() {
        Ok(v)
    } else {
        Err(QuadratureError::NonFinite { x })
    }
}

/// One 15-point Kronrod estimate over `[a, b]`, with the embedded 7-point Gauss rule used for the
/// error estimate.
fn gauss_kronrod_15(f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> Result<Segment, QuadratureError> {
    let centre = 0.5 * (a + b);
    let half = 0.5 * (b - a);
    let abs_half = half.abs();

    let fc = eval(f, centre)?;
    let mut res_gauss = fc * WG[3];
    let mut res_kronrod = fc * WGK[HALF_NODES - 1];
    let mut res_abs = res_kronrod.abs();

    let mut fv1 = [0.0; HALF_NODES - 1];
    let mut fv2 = [0.0; HALF_NODES - 1];

    for j in 0..HALF_NODES - 1 {
        let dx = half * XGK[j];
        let f1 = eval(f, centre - dx)?;
        let f2 = eval(f, centre + dx)?;
        fv1[j] = f1;
        fv2[j] = f2;

        let sum = f1 + f2;
        res_kronrod += WGK[j] * sum;
        res_abs += WGK[j] * (f1.abs() + f2.abs());
        // Odd Kronrod nodes are shared with the Gauss rule.
        if j % 2 == 1 {
            res_gauss += WG[j / 2] * sum;
        }
    }

    let mean = 0.5 * res_kronrod;
    let mut res_asc = WGK[HALF_NODES - 1] * (fc - mean).abs();
    for j in 0..HALF_NODES - 1 {
        res_asc += WGK[j] * ((fv1[j] - mean).abs() + (fv2[j] - mean).abs());
    }

    let value = res_kronrod * half;
    res_abs *= abs_half;
    res_asc *= abs_half;

    let mut abs_error = ((res_kronrod - res_gauss) * half).abs();
    if res_asc != 0.0 && abs_error != 0.0 {
        abs_error = res_asc * (200.0 * abs_error / res_asc).powf(1.5).min(1.0);
    }
    let roundoff = if res_abs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        50.0 * f64::EPSILON * res_abs
    } else {
        0.0
    };
    abs_error = abs_error.max(roundoff);

    Ok(Segment {
        a,
        b,
        value,
        abs_error,
        roundoff,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/quadrature/adaptive.rs"]
mod tests;
