use std::sync::Arc;

use crate::foundation::error::{FourierError, FourierResult};

/// Integration limits and fundamental period of a series.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "IntervalRepr", into = "IntervalRepr")]
pub struct Interval {
    lower: f64,
    upper: f64, // strictly greater than lower
}

#[derive(serde::Serialize, serde::Deserialize)]
struct IntervalRepr {
    lower: f64,
    upper: f64,
}

impl TryFrom<IntervalRepr> for Interval {
    type Error = FourierError;

    fn try_from(r: IntervalRepr) -> FourierResult<Self> {
        Self::new(r.lower, r.upper)
    }
}

impl From<Interval> for IntervalRepr {
    fn from(i: Interval) -> Self {
        Self {
            lower: i.lower,
            upper: i.upper,
        }
    }
}

impl Interval {
    /// `[-π, π]`, the interval used when nothing else is configured.
    pub const SYMMETRIC_PI: Self = Self {
        lower: -std::f64::consts::PI,
        upper: std::f64::consts::PI,
    };

    /// Build an interval, rejecting non-finite bounds and `lower >= upper`.
    pub fn new(lower: f64, upper: f64) -> FourierResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(FourierError::InvalidInterval { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Lower limit.
    pub fn lower(self) -> f64 {
        self.lower
    }

    /// Upper limit.
    pub fn upper(self) -> f64 {
        self.upper
    }

    /// `upper - lower`, the fundamental period.
    pub fn width(self) -> f64 {
        self.upper - self.lower
    }

    /// Half of the fundamental period.
    pub fn half_period(self) -> f64 {
        self.width() / 2.0
    }

    /// Midpoint of the interval.
    pub fn midpoint(self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    /// Whether `x` lies inside the closed interval.
    pub fn contains(self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::SYMMETRIC_PI
    }
}

/// Evenly spaced sample points covering an interval, endpoints included.
///
/// Points are shared so frames of one run can hold the domain without copying it.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleDomain {
    interval: Interval,
    points: Arc<[f64]>,
}

impl SampleDomain {
    /// Sample count used when nothing else is configured.
    pub const DEFAULT_POINTS: usize = 1000;

    /// `num_points` evenly spaced values from `interval.lower()` to `interval.upper()`.
    ///
    /// The first point is exactly the lower limit and, for `num_points > 1`, the last point is
    /// exactly the upper limit. A single point yields `[lower]`.
    pub fn linspace(interval: Interval, num_points: usize) -> FourierResult<Self> {
        if num_points == 0 {
            return Err(FourierError::validation("sample domain needs at least one point"));
        }

        let mut points = Vec::with_capacity(num_points);
        if num_points == 1 {
            points.push(interval.lower());
        } else {
            let step = interval.width() / (num_points - 1) as f64;
            for i in 0..num_points - 1 {
                points.push(interval.lower() + (i as f64) * step);
            }
            points.push(interval.upper());
        }

        Ok(Self {
            interval,
            points: points.into(),
        })
    }

    /// Interval the points were drawn from.
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Sample points in ascending order.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Shared handle to the sample points.
    pub fn shared_points(&self) -> Arc<[f64]> {
        Arc::clone(&self.points)
    }

    /// Number of sample points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a domain holds at least one point.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Output raster size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Reject empty canvases and sizes the CPU rasterizer cannot address.
    pub fn validate(self) -> FourierResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FourierError::validation("canvas width and height must be > 0"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(FourierError::validation(format!(
                "canvas {}x{} exceeds {}x{}",
                self.width,
                self.height,
                u16::MAX,
                u16::MAX
            )));
        }
        Ok(())
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb` form used in SVG attributes.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
