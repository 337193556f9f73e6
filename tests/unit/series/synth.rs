use std::cell::Cell;
use std::f64::consts::PI;

use super::*;
use crate::quadrature::adaptive::AdaptiveQuadrature;
use crate::quadrature::{QuadratureError, QuadratureEstimate};

fn square(t: f64) -> f64 {
    t * t
}

fn domain(n: usize) -> SampleDomain {
    SampleDomain::linspace(Interval::SYMMETRIC_PI, n).unwrap()
}

#[test]
fn zero_harmonics_yields_no_frames() {
    let q = AdaptiveQuadrature::default();
    let frames = synthesize(&q, square, Interval::SYMMETRIC_PI, 0, &domain(16)).unwrap();
    assert_eq!(frames.count(), 0);
}

#[test]
fn negative_harmonics_are_rejected() {
    let q = AdaptiveQuadrature::default();
    let err = synthesize(&q, square, Interval::SYMMETRIC_PI, -1, &domain(16))
        .err()
        .unwrap();
    assert!(matches!(err, FourierError::InvalidHarmonicCount(-1)));
}

#[test]
fn produces_one_frame_per_harmonic_in_order() {
    let q = AdaptiveQuadrature::default();
    let frames: Vec<Frame> = synthesize(&q, square, Interval::SYMMETRIC_PI, 7, &domain(33))
        .unwrap()
        .collect::<FourierResult<_>>()
        .unwrap();

    assert_eq!(frames.len(), 7);
    for (i, f) in frames.iter().enumerate() {
        assert_eq!(f.harmonic, i as u32 + 1);
        assert_eq!(f.coefficients.k, f.harmonic);
        assert_eq!(f.len(), 33);
        assert_eq!(f.domain.len(), 33);
        assert_eq!(f.target.len(), 33);
    }
    assert!(Arc::ptr_eq(&frames[0].domain, &frames[6].domain));
}

#[test]
fn first_frame_at_origin_is_offset_plus_first_cosine() {
    let q = AdaptiveQuadrature::default();
    let mut frames = synthesize(&q, square, Interval::SYMMETRIC_PI, 1, &domain(5)).unwrap();
    let offset = frames.offset();
    assert!((offset - PI * PI / 3.0).abs() < 1e-6);

    let first = frames.next().unwrap().unwrap();
    assert!(frames.next().is_none());

    assert_eq!(first.domain[2], 0.0);
    let expected = offset + first.coefficients.cosine;
    assert!((first.partial_sum[2] - expected).abs() < 1e-12);
    assert!((first.coefficients.cosine + 4.0).abs() < 1e-6);
}

#[test]
fn partial_sums_accumulate_terms() {
    let q = AdaptiveQuadrature::default();
    let frames: Vec<Frame> = synthesize(&q, square, Interval::SYMMETRIC_PI, 3, &domain(9))
        .unwrap()
        .collect::<FourierResult<_>>()
        .unwrap();

    let h = PI;
    for pair in frames.windows(2) {
        for (i, &x) in pair[1].domain.iter().enumerate() {
            let delta = pair[1].partial_sum[i] - pair[0].partial_sum[i];
            assert!((delta - pair[1].coefficients.term(h, x)).abs() < 1e-12);
        }
    }
}

#[test]
fn mean_squared_error_decreases_for_smooth_target() {
    let q = AdaptiveQuadrature::default();
    let frames: Vec<Frame> = synthesize(&q, square, Interval::SYMMETRIC_PI, 30, &domain(1000))
        .unwrap()
        .collect::<FourierResult<_>>()
        .unwrap();

    let mse: Vec<f64> = frames.iter().map(Frame::mean_squared_error).collect();
    assert!(mse[0] > mse[3]);
    assert!(mse[3] > mse[15]);
    assert!(mse[15] > mse[29]);
    assert!(mse[29] < 1e-2, "mse at K=30 is {}", mse[29]);
    assert!(frames[29].max_abs_error() < frames[0].max_abs_error());
}

#[test]
fn size_hint_tracks_remaining_frames() {
    let q = AdaptiveQuadrature::default();
    let mut frames = synthesize(&q, square, Interval::SYMMETRIC_PI, 3, &domain(4)).unwrap();
    assert_eq!(frames.size_hint(), (0, Some(3)));
    frames.next().unwrap().unwrap();
    assert_eq!(frames.remaining(), 2);
    assert_eq!(frames.size_hint(), (0, Some(2)));
}

/// Succeeds for the first `ok_calls` integrals, then fails.
struct FlakyQuadrature {
    inner: AdaptiveQuadrature,
    ok_calls: Cell<usize>,
}

impl Quadrature for FlakyQuadrature {
    fn integrate(
        &self,
        integrand: &dyn Fn(f64) -> f64,
        limits: Interval,
    ) -> Result<QuadratureEstimate, QuadratureError> {
        if self.ok_calls.get() == 0 {
            return Err(QuadratureError::NonFinite { x: 0.0 });
        }
        self.ok_calls.set(self.ok_calls.get() - 1);
        self.inner.integrate(integrand, limits)
    }
}

#[test]
fn integration_failure_ends_the_sequence() {
    // offset + cosine/sine for K=1, then the K=2 cosine fails
    let q = FlakyQuadrature {
        inner: AdaptiveQuadrature::default(),
        ok_calls: Cell::new(3),
    };
    let mut frames = synthesize(&q, square, Interval::SYMMETRIC_PI, 5, &domain(8)).unwrap();

    assert!(frames.next().unwrap().is_ok());
    let err = frames.next().unwrap().unwrap_err();
    assert!(matches!(err, FourierError::IntegrationFailure(_)));
    assert!(frames.next().is_none());
    assert_eq!(frames.remaining(), 0);
}

#[test]
fn failing_offset_fails_construction() {
    let q = FlakyQuadrature {
        inner: AdaptiveQuadrature::default(),
        ok_calls: Cell::new(0),
    };
    assert!(matches!(
        synthesize(&q, square, Interval::SYMMETRIC_PI, 5, &domain(8)),
        Err(FourierError::IntegrationFailure(_))
    ));
}

#[test]
fn wide_interval_produces_every_frame() {
    let q = AdaptiveQuadrature::default();
    let limits = Interval::new(-1000.0, 1000.0).unwrap();
    let domain = SampleDomain::linspace(limits, 21).unwrap();
    let frames: Vec<Frame> = synthesize(&q, square, limits, 3, &domain)
        .unwrap()
        .collect::<FourierResult<_>>()
        .unwrap();

    assert_eq!(frames.len(), 3);
    let a0 = 1.0e6 / 3.0;
    assert!(((frames[0].offset - a0) / a0).abs() < 1e-8);
    assert!(frames.iter().all(|f| f.coefficients.sine.abs() < 1e-6));
}
