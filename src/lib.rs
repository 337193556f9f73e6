//! Fourier series partial sums, animated.
//!
//! The crate estimates the trigonometric coefficients of a real function over a finite interval by
//! adaptive numeric integration, then synthesizes the partial sums `PartialSum(K)` for
//! `K = 1..=total_harmonics` and streams each one as a [`Frame`] into a [`FrameSink`]:
//!
//! - Pick a [`TargetFunction`] (or any `Fn(f64) -> f64`) and an [`Interval`]
//! - Call [`synthesize`] to get a lazy, ordered [`PartialSums`] sequence
//! - Drive it into a sink with [`run_series`], or let [`render_animation`] write a GIF
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod pipeline;

pub(crate) mod encode;
pub(crate) mod quadrature;
pub(crate) mod render;
pub(crate) mod series;

pub use crate::foundation::core::{Canvas, Interval, Rgba8, SampleDomain};
pub use crate::foundation::error::{FourierError, FourierResult};

pub use crate::quadrature::adaptive::{AdaptiveQuadrature, Tolerances};
pub use crate::quadrature::{Quadrature, QuadratureError, QuadratureEstimate, QuadratureStats};

pub use crate::series::coefficients::{
    CoefficientSet, coefficients, cosine_coefficient, cosine_integrand, harmonic_angle, offset,
    sine_coefficient, sine_integrand,
};
pub use crate::series::metrics::{max_abs_error, mean_squared_error};
pub use crate::series::synth::{Frame, PartialSums, synthesize};
pub use crate::series::target::TargetFunction;

pub use crate::render::FrameRGBA;
pub use crate::render::plot::{PlotRenderer, PlotStyle};

pub use crate::encode::gif::{GifSink, GifSinkOpts};
pub use crate::encode::png_seq::PngSequenceSink;
pub use crate::encode::report::{HarmonicReport, ReportSink, ReportTarget, SeriesReport};
pub use crate::encode::sink::{FanoutSink, FrameSink, InMemorySink, SinkConfig};

pub use crate::config::{PlotConfig, QuadratureConfig, RunConfig};
pub use crate::pipeline::{
    RunStats, render_animation, render_frames, run_config, run_series, series_report,
};
