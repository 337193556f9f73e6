use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::gif::GifSinkOpts;
use crate::foundation::core::{Canvas, Interval};
use crate::foundation::error::{FourierError, FourierResult};
use crate::quadrature::adaptive::{AdaptiveQuadrature, Tolerances};
use crate::render::plot::PlotStyle;
use crate::series::target::TargetFunction;

/// Everything one run needs, loadable from JSON.
///
/// Missing fields take their defaults, unknown fields are rejected.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Function whose series is computed.
    pub function: TargetFunction,
    /// Lower integration limit.
    pub lower: f64,
    /// Upper integration limit.
    pub upper: f64,
    /// Number of frames (harmonic counts `1..=total_harmonics`).
    pub total_harmonics: i64,
    /// Sample points per frame.
    pub num_points: usize,
    /// Numeric integration settings.
    pub quadrature: QuadratureConfig,
    /// Rendering settings.
    pub plot: PlotConfig,
    /// Animation output path.
    pub out: PathBuf,
    /// Optional JSON convergence report path.
    pub report: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            function: TargetFunction::default(),
            lower: Interval::SYMMETRIC_PI.lower(),
            upper: Interval::SYMMETRIC_PI.upper(),
            total_harmonics: 30,
            num_points: 1000,
            quadrature: QuadratureConfig::default(),
            plot: PlotConfig::default(),
            out: PathBuf::from(GifSinkOpts::DEFAULT_PATH),
            report: None,
        }
    }
}

/// Numeric integration settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QuadratureConfig {
    /// Absolute error target.
    pub abs_tol: f64,
    /// Relative error target.
    pub rel_tol: f64,
    /// Bisection limit per integral.
    pub max_subdivisions: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        let tol = Tolerances::default();
        Self {
            abs_tol: tol.abs,
            rel_tol: tol.rel,
            max_subdivisions: AdaptiveQuadrature::DEFAULT_MAX_SUBDIVISIONS,
        }
    }
}

/// Rendering settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Display time of each frame.
    pub frame_delay_ms: u32,
    /// Draw the target formula above the plot.
    pub show_title: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            width: canvas.width,
            height: canvas.height,
            frame_delay_ms: GifSinkOpts::DEFAULT_DELAY_MS,
            show_title: true,
        }
    }
}

impl RunConfig {
    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> FourierResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        Ok(cfg)
    }

    /// Check every invariant before any computation starts.
    pub fn validate(&self) -> FourierResult<()> {
        self.interval()?;
        if self.total_harmonics < 0 {
            return Err(FourierError::InvalidHarmonicCount(self.total_harmonics));
        }
        if self.num_points == 0 {
            return Err(FourierError::validation("num_points must be > 0"));
        }
        self.tolerances()?;
        if self.plot.frame_delay_ms == 0 {
            return Err(FourierError::validation("frame_delay_ms must be > 0"));
        }
        self.plot_style().validate()
    }

    /// Validated integration limits.
    pub fn interval(&self) -> FourierResult<Interval> {
        Interval::new(self.lower, self.upper)
    }

    /// Validated quadrature tolerances.
    pub fn tolerances(&self) -> FourierResult<Tolerances> {
        Tolerances::new(self.quadrature.abs_tol, self.quadrature.rel_tol)
    }

    /// Quadrature routine for this run.
    pub fn quadrature(&self) -> FourierResult<AdaptiveQuadrature> {
        Ok(AdaptiveQuadrature::new(self.tolerances()?)
            .with_max_subdivisions(self.quadrature.max_subdivisions))
    }

    /// Plot style for this run.
    pub fn plot_style(&self) -> PlotStyle {
        PlotStyle {
            canvas: Canvas {
                width: self.plot.width,
                height: self.plot.height,
            },
            show_title: self.plot.show_title,
            ..PlotStyle::default()
        }
    }

    /// GIF sink options for this run.
    pub fn gif_opts(&self) -> GifSinkOpts {
        GifSinkOpts {
            out_path: self.out.clone(),
            frame_delay_ms: self.plot.frame_delay_ms,
            style: self.plot_style(),
            title: Some(self.function.formula().to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
