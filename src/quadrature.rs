//! Adaptive numeric integration used by the coefficient estimator.

pub(crate) mod adaptive;
pub(crate) mod kronrod;

use crate::foundation::core::Interval;

/// Definite integration over a closed interval.
///
/// Implementations only evaluate the integrand; they never cache results between calls.
pub trait Quadrature {
    /// Integrate `integrand` over `limits`.
    fn integrate(
        &self,
        integrand: &dyn Fn(f64) -> f64,
        limits: Interval,
    ) -> Result<QuadratureEstimate, QuadratureError>;
}

/// Result of a successful integration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadratureEstimate {
    /// Integral estimate.
    pub value: f64,
    /// Estimated absolute error of `value`.
    pub abs_error: f64,
    /// Work spent.
    pub stats: QuadratureStats,
}

/// Integration statistics for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuadratureStats {
    /// Total number of integrand evaluations.
    pub fn_evals: u64,
    /// Number of bisections performed.
    pub subdivisions: usize,
}

/// Reasons an integral could not be computed.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QuadratureError {
    /// The integrand produced NaN or an infinity.
    #[error("integrand is not finite at x = {x}")]
    NonFinite {
        /// Abscissa of the offending evaluation.
        x: f64,
    },

    /// The error target was not reached within the subdivision limit.
    #[error("tolerance not reached after {limit} subdivisions (estimated error {abs_error:e})")]
    MaxSubdivisions {
        /// Subdivision limit that was hit.
        limit: usize,
        /// Error estimate at the point of giving up.
        abs_error: f64,
    },

    /// A segment became too narrow to bisect in floating point.
    #[error("segment [{a}, {b}] is too narrow to subdivide")]
    Roundoff {
        /// Segment start.
        a: f64,
        /// Segment end.
        b: f64,
    },
}
