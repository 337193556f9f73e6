use std::sync::Arc;

use crate::foundation::core::{Interval, SampleDomain};
use crate::foundation::error::{FourierError, FourierResult};
use crate::quadrature::Quadrature;
use crate::series::coefficients::{CoefficientSet, coefficients, offset};
use crate::series::metrics;

/// Snapshot of the series truncated at one harmonic count.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Harmonic count `K` of this partial sum (`>= 1`).
    pub harmonic: u32,
    /// Coefficients of harmonic `K`, the term added to produce this frame.
    pub coefficients: CoefficientSet,
    /// Zeroth coefficient shared by every frame of the run.
    pub offset: f64,
    /// Sample points, shared across the run.
    pub domain: Arc<[f64]>,
    /// Target function at each sample point, shared across the run.
    pub target: Arc<[f64]>,
    /// Partial sum at each sample point.
    pub partial_sum: Vec<f64>,
}

impl Frame {
    /// Mean squared error of the partial sum against the target.
    pub fn mean_squared_error(&self) -> f64 {
        metrics::sum_squared(&self.partial_sum, &self.target) / self.partial_sum.len() as f64
    }

    /// Largest pointwise deviation of the partial sum from the target.
    pub fn max_abs_error(&self) -> f64 {
        metrics::max_abs(&self.partial_sum, &self.target)
    }

    /// Number of sample points.
    pub fn len(&self) -> usize {
        self.partial_sum.len()
    }

    /// Whether the frame has no sample points.
    pub fn is_empty(&self) -> bool {
        self.partial_sum.is_empty()
    }
}

/// Lazy sequence of [`Frame`]s for `K = 1..=total_harmonics`.
///
/// Each step integrates the coefficients of exactly one harmonic and adds its term to a running
/// accumulator that starts as the offset broadcast over the domain. The `K = 0` state is never
/// yielded. After an error item the sequence ends.
pub struct PartialSums<'q, F> {
    quadrature: &'q dyn Quadrature,
    function: F,
    limits: Interval,
    half_period: f64,
    offset: f64,
    domain: Arc<[f64]>,
    target: Arc<[f64]>,
    accumulator: Vec<f64>,
    emitted: u32,
    total: u32,
    failed: bool,
}

/// Start synthesizing the partial sums of `function` over `limits`.
///
/// The offset is integrated here, once, so a failing offset integral is reported before any frame
/// is produced. `total_harmonics == 0` yields an empty sequence; negative counts are rejected.
#[tracing::instrument(skip(quadrature, function, domain), fields(num_points = domain.len()))]
pub fn synthesize<'q, F>(
    quadrature: &'q dyn Quadrature,
    function: F,
    limits: Interval,
    total_harmonics: i64,
    domain: &SampleDomain,
) -> FourierResult<PartialSums<'q, F>>
where
    F: Fn(f64) -> f64,
{
    let total = u32::try_from(total_harmonics)
        .map_err(|_| FourierError::InvalidHarmonicCount(total_harmonics))?;

    let half_period = limits.half_period();
    let offset = offset(quadrature, &function, half_period, limits)?;
    tracing::debug!(offset, "offset coefficient");

    let points = domain.shared_points();
    let target: Arc<[f64]> = points.iter().map(|&x| function(x)).collect();

    Ok(PartialSums {
        quadrature,
        function,
        limits,
        half_period,
        offset,
        accumulator: vec![offset; points.len()],
        domain: points,
        target,
        emitted: 0,
        total,
        failed: false,
    })
}

impl<F> PartialSums<'_, F>
where
    F: Fn(f64) -> f64,
{
    /// Zeroth coefficient of the run.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Integration limits of the series.
    pub fn limits(&self) -> Interval {
        self.limits
    }

    /// Number of frames this sequence was asked to produce.
    pub fn total_harmonics(&self) -> u32 {
        self.total
    }

    /// Frames not yet produced (`0` once an error has been yielded).
    pub fn remaining(&self) -> u32 {
        if self.failed {
            0
        } else {
            self.total - self.emitted
        }
    }

    /// Shared sample points.
    pub fn domain(&self) -> &Arc<[f64]> {
        &self.domain
    }

    /// Shared target values.
    pub fn target(&self) -> &Arc<[f64]> {
        &self.target
    }

    fn step(&mut self, k: u32) -> FourierResult<Frame> {
        let set = coefficients(
            self.quadrature,
            k,
            &self.function,
            self.half_period,
            self.limits,
        )?;

        for (acc, &x) in self.accumulator.iter_mut().zip(self.domain.iter()) {
            *acc += set.term(self.half_period, x);
        }

        Ok(Frame {
            harmonic: k,
            coefficients: set,
            offset: self.offset,
            domain: Arc::clone(&self.domain),
            target: Arc::clone(&self.target),
            partial_sum: self.accumulator.clone(),
        })
    }
}

impl<F> Iterator for PartialSums<'_, F>
where
    F: Fn(f64) -> f64,
{
    type Item = FourierResult<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining() == 0 {
            return None;
        }
        self.emitted += 1;
        let k = self.emitted;

        match self.step(k) {
            Ok(frame) => {
                tracing::debug!(
                    k,
                    cosine = frame.coefficients.cosine,
                    sine = frame.coefficients.sine,
                    "harmonic added"
                );
                Some(Ok(frame))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // An error item ends the sequence early, so only the upper bound is firm.
        (0, Some(self.remaining() as usize))
    }
}

impl<F> std::iter::FusedIterator for PartialSums<'_, F> where F: Fn(f64) -> f64 {}

#[cfg(test)]
#[path = "../../tests/unit/series/synth.rs"]
mod tests;
