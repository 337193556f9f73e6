use std::path::PathBuf;

use anyhow::Context as _;

use crate::encode::sink::{FrameOrder, FrameSink, SinkConfig, ensure_parent_dir};
use crate::foundation::error::FourierResult;
use crate::series::synth::Frame;

/// Convergence figures for one harmonic count.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HarmonicReport {
    /// Harmonic count `K`.
    pub k: u32,
    /// Cosine coefficient of harmonic `K`.
    pub cosine: f64,
    /// Sine coefficient of harmonic `K`.
    pub sine: f64,
    /// Mean squared error of `PartialSum(K)` on the sample domain.
    pub mse: f64,
    /// Largest pointwise error of `PartialSum(K)` on the sample domain.
    pub max_abs_error: f64,
}

/// Whole-run convergence report.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeriesReport {
    /// Lower integration limit.
    pub lower: f64,
    /// Upper integration limit.
    pub upper: f64,
    /// Sample points per frame.
    pub num_points: usize,
    /// Zeroth coefficient.
    pub offset: f64,
    /// One entry per frame, ascending `k`.
    pub harmonics: Vec<HarmonicReport>,
}

impl SeriesReport {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> FourierResult<String> {
        Ok(serde_json::to_string_pretty(self).context("serialize series report")?)
    }
}

/// Where a [`ReportSink`] delivers its report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportTarget {
    /// Write JSON to a file.
    File(PathBuf),
    /// Print JSON to stdout.
    Stdout,
    /// Keep the report in memory only.
    Memory,
}

/// Collects per-harmonic coefficients and errors, then emits them as JSON at `end`.
pub struct ReportSink {
    target: ReportTarget,
    order: FrameOrder,
    report: SeriesReport,
}

impl ReportSink {
    /// Sink delivering to `target`.
    pub fn new(target: ReportTarget) -> Self {
        Self {
            target,
            order: FrameOrder::default(),
            report: SeriesReport::default(),
        }
    }

    /// Report collected so far.
    pub fn report(&self) -> &SeriesReport {
        &self.report
    }
}

impl FrameSink for ReportSink {
    fn begin(&mut self, cfg: SinkConfig) -> FourierResult<()> {
        self.order.begin(cfg);
        self.report = SeriesReport {
            lower: cfg.interval.lower(),
            upper: cfg.interval.upper(),
            num_points: cfg.num_points,
            offset: cfg.offset,
            harmonics: Vec::with_capacity(cfg.total_frames as usize),
        };
        Ok(())
    }

    fn push_frame(&mut self, frame: &Frame) -> FourierResult<()> {
        self.order.accept(frame)?;
        self.report.harmonics.push(HarmonicReport {
            k: frame.harmonic,
            cosine: frame.coefficients.cosine,
            sine: frame.coefficients.sine,
            mse: frame.mean_squared_error(),
            max_abs_error: frame.max_abs_error(),
        });
        Ok(())
    }

    fn end(&mut self) -> FourierResult<()> {
        self.order.finish()?;
        match &self.target {
            ReportTarget::File(path) => {
                ensure_parent_dir(path)?;
                std::fs::write(path, self.report.to_json()?)
                    .with_context(|| format!("write report '{}'", path.display()))?;
                tracing::info!(path = %path.display(), "wrote report");
            }
            ReportTarget::Stdout => println!("{}", self.report.to_json()?),
            ReportTarget::Memory => {}
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/report.rs"]
mod tests;
