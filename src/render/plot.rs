use kurbo::{Affine, BezPath, Point, Rect, Shape as _};

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{FourierError, FourierResult};
use crate::render::FrameRGBA;
use crate::render::composite::{over_in_place, unpremultiply_in_place};
use crate::render::text::{Anchor, Label, LabelRasterizer};
use crate::series::synth::Frame;

/// Cosmetic settings for rendered frames.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Output size.
    pub canvas: Canvas,
    /// Fill behind everything.
    pub background: Rgba8,
    /// Fill of the plot area.
    pub plot_background: Rgba8,
    /// Grid line color.
    pub grid: Rgba8,
    /// Color of the `x = 0` / `y = 0` axes and the legend border.
    pub axis: Rgba8,
    /// Title and legend text color.
    pub text: Rgba8,
    /// Color of the target function curve.
    pub target_color: Rgba8,
    /// Partial-sum colors, cycled by harmonic count.
    pub palette: Vec<Rgba8>,
    /// Curve stroke width in pixels.
    pub stroke_width: f64,
    /// Gap between the canvas edge and the plot area in pixels.
    pub margin: f64,
    /// Label font size in pixels.
    pub font_size: f64,
    /// Grid divisions per axis.
    pub grid_divisions: u32,
    /// Draw the target formula above the plot.
    pub show_title: bool,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            background: Rgba8::opaque(255, 255, 255),
            plot_background: Rgba8::opaque(238, 238, 238),
            grid: Rgba8::opaque(200, 200, 200),
            axis: Rgba8::opaque(120, 120, 120),
            text: Rgba8::opaque(34, 34, 34),
            target_color: Rgba8::opaque(0, 0, 0),
            palette: vec![
                Rgba8::opaque(0x34, 0x8a, 0xbd),
                Rgba8::opaque(0xa6, 0x06, 0x28),
                Rgba8::opaque(0x7a, 0x68, 0xa6),
                Rgba8::opaque(0x46, 0x78, 0x21),
                Rgba8::opaque(0xd5, 0x5e, 0x00),
                Rgba8::opaque(0xcc, 0x79, 0xa7),
                Rgba8::opaque(0x56, 0xb4, 0xe9),
                Rgba8::opaque(0x00, 0x9e, 0x73),
            ],
            stroke_width: 2.0,
            margin: 40.0,
            font_size: 14.0,
            grid_divisions: 8,
            show_title: true,
        }
    }
}

impl PlotStyle {
    /// Reject styles the renderer cannot draw.
    pub fn validate(&self) -> FourierResult<()> {
        self.canvas.validate()?;
        if self.palette.is_empty() {
            return Err(FourierError::validation("plot palette must not be empty"));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(FourierError::validation("stroke width must be > 0"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(FourierError::validation("font size must be > 0"));
        }
        let min_side = f64::from(self.canvas.width.min(self.canvas.height));
        if !self.margin.is_finite() || self.margin < 0.0 || 2.0 * self.margin >= min_side {
            return Err(FourierError::validation(
                "margin must leave a non-empty plot area",
            ));
        }
        Ok(())
    }

    /// Partial-sum color for harmonic count `k`.
    pub fn series_color(&self, k: u32) -> Rgba8 {
        let i = (k.saturating_sub(1) as usize) % self.palette.len().max(1);
        self.palette
            .get(i)
            .copied()
            .unwrap_or(Rgba8::opaque(0, 0, 255))
    }
}

/// Draws frames as line plots: target curve, partial sum, legend `k = K`, optional title.
///
/// The vertical range only ever grows over the renderer's life so consecutive frames share axes.
pub struct PlotRenderer {
    style: PlotStyle,
    title: Option<String>,
    y_range: Option<(f64, f64)>,
    labels: LabelRasterizer,
}

const Y_PADDING: f64 = 0.08;

impl PlotRenderer {
    /// Create a renderer after validating `style`.
    pub fn new(style: PlotStyle) -> FourierResult<Self> {
        style.validate()?;
        Ok(Self {
            style,
            title: None,
            y_range: None,
            labels: LabelRasterizer::new(),
        })
    }

    /// Text drawn above the plot when [`PlotStyle::show_title`] is set.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Style in use.
    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    /// Current vertical data range, once a frame has been rendered.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.y_range
    }

    /// Rasterize one frame to straight-alpha RGBA8.
    #[tracing::instrument(skip(self, frame), fields(k = frame.harmonic))]
    pub fn render(&mut self, frame: &Frame) -> FourierResult<FrameRGBA> {
        if frame.domain.len() != frame.partial_sum.len() || frame.target.len() != frame.len() {
            return Err(FourierError::render("frame sample lengths differ"));
        }
        let (x0, x1) = x_extent(&frame.domain)?;
        let (y0, y1) = self.grow_y_range(frame);

        let canvas = self.style.canvas;
        let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
        let top = if self.show_title() {
            self.style.margin + self.style.font_size
        } else {
            self.style.margin
        };
        let plot = Rect::new(self.style.margin, top, w - self.style.margin, h - self.style.margin);
        if plot.width() <= 0.0 || plot.height() <= 0.0 {
            return Err(FourierError::render("plot area is empty"));
        }
        let to_px = data_to_pixels(plot, (x0, x1), (y0, y1));

        let width_u16: u16 = canvas
            .width
            .try_into()
            .map_err(|_| FourierError::render("canvas width exceeds u16"))?;
        let height_u16: u16 = canvas
            .height
            .try_into()
            .map_err(|_| FourierError::render("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);

        ctx.set_paint(color_to_cpu(self.style.background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        ctx.set_paint(color_to_cpu(self.style.plot_background));
        ctx.fill_rect(&rect_to_cpu(plot));

        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(1.0));
        ctx.set_paint(color_to_cpu(self.style.grid));
        ctx.stroke_path(&bezpath_to_cpu(&grid_path(plot, self.style.grid_divisions)));

        let mut axes = BezPath::new();
        if (y0..=y1).contains(&0.0) {
            axes.move_to(to_px * Point::new(x0, 0.0));
            axes.line_to(to_px * Point::new(x1, 0.0));
        }
        if (x0..=x1).contains(&0.0) {
            axes.move_to(to_px * Point::new(0.0, y0));
            axes.line_to(to_px * Point::new(0.0, y1));
        }
        ctx.set_paint(color_to_cpu(self.style.axis));
        ctx.stroke_path(&bezpath_to_cpu(&axes));

        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(self.style.stroke_width));
        ctx.set_paint(color_to_cpu(self.style.target_color));
        ctx.stroke_path(&bezpath_to_cpu(&polyline(&frame.domain, &frame.target, to_px)));

        let series = self.style.series_color(frame.harmonic);
        ctx.set_paint(color_to_cpu(series));
        ctx.stroke_path(&bezpath_to_cpu(&polyline(
            &frame.domain,
            &frame.partial_sum,
            to_px,
        )));

        let legend = self.legend_box(plot, frame.harmonic);
        ctx.set_paint(color_to_cpu(self.style.background));
        ctx.fill_rect(&rect_to_cpu(legend.frame));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(1.0));
        ctx.set_paint(color_to_cpu(self.style.axis));
        ctx.stroke_path(&bezpath_to_cpu(&legend.frame.to_path(0.1)));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(self.style.stroke_width));
        ctx.set_paint(color_to_cpu(series));
        ctx.stroke_path(&bezpath_to_cpu(&legend.swatch));

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width_u16, height_u16);
        ctx.render_to_pixmap(&mut pixmap);

        let mut labels = vec![legend.label];
        if let Some(title) = self.title.as_ref().filter(|_| self.show_title()) {
            labels.push(Label {
                x: w / 2.0,
                y: top - 0.6 * self.style.font_size,
                text: title.clone(),
                size: self.style.font_size * 1.15,
                color: self.style.text,
                anchor: Anchor::Middle,
            });
        }
        let text_layer = self.labels.rasterize(canvas, &labels)?;

        let mut data = pixmap.data_as_u8_slice().to_vec();
        over_in_place(&mut data, &text_layer)?;
        unpremultiply_in_place(&mut data);

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data,
            premultiplied: false,
        })
    }

    fn show_title(&self) -> bool {
        self.style.show_title && self.title.is_some()
    }

    fn grow_y_range(&mut self, frame: &Frame) -> (f64, f64) {
        let (lo, hi) = frame
            .target
            .iter()
            .chain(frame.partial_sum.iter())
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let (lo, hi) = if lo > hi {
            (-1.0, 1.0)
        } else if lo == hi {
            (lo - 1.0, hi + 1.0)
        } else {
            let pad = (hi - lo) * Y_PADDING;
            (lo - pad, hi + pad)
        };

        let range = match self.y_range {
            Some((a, b)) => (a.min(lo), b.max(hi)),
            None => (lo, hi),
        };
        self.y_range = Some(range);
        range
    }

    fn legend_box(&self, plot: Rect, k: u32) -> Legend {
        let fs = self.style.font_size;
        let text = format!("k = {k}");
        let swatch_len = 2.0 * fs;
        let width = swatch_len + fs * (0.6 * text.chars().count() as f64 + 1.5);
        let height = 1.8 * fs;
        let x1 = plot.x1 - 0.5 * fs;
        let y0 = plot.y0 + 0.5 * fs;
        let frame = Rect::new(x1 - width, y0, x1, y0 + height);

        let mid_y = frame.y0 + height / 2.0;
        let mut swatch = BezPath::new();
        swatch.move_to(Point::new(frame.x0 + 0.4 * fs, mid_y));
        swatch.line_to(Point::new(frame.x0 + 0.4 * fs + swatch_len, mid_y));

        Legend {
            frame,
            swatch,
            label: Label {
                x: frame.x0 + 0.8 * fs + swatch_len,
                y: mid_y + 0.35 * fs,
                text,
                size: fs,
                color: self.style.text,
                anchor: Anchor::Start,
            },
        }
    }
}

struct Legend {
    frame: Rect,
    swatch: BezPath,
    label: Label,
}

fn x_extent(domain: &[f64]) -> FourierResult<(f64, f64)> {
    let (Some(&first), Some(&last)) = (domain.first(), domain.last()) else {
        return Err(FourierError::render("frame has no sample points"));
    };
    if first < last {
        Ok((first, last))
    } else {
        // A single-point domain still gets a visible x axis.
        Ok((first - 1.0, first + 1.0))
    }
}

/// Map data coordinates onto `plot`, flipping y so larger values sit higher.
pub(crate) fn data_to_pixels(plot: Rect, (x0, x1): (f64, f64), (y0, y1): (f64, f64)) -> Affine {
    let sx = plot.width() / (x1 - x0);
    let sy = plot.height() / (y1 - y0);
    Affine::new([sx, 0.0, 0.0, -sy, plot.x0 - x0 * sx, plot.y1 + y0 * sy])
}

pub(crate) fn polyline(xs: &[f64], ys: &[f64], to_px: Affine) -> BezPath {
    let mut path = BezPath::new();
    let mut pen_down = false;
    for (&x, &y) in xs.iter().zip(ys) {
        if !x.is_finite() || !y.is_finite() {
            pen_down = false;
            continue;
        }
        let p = to_px * Point::new(x, y);
        if pen_down {
            path.line_to(p);
        } else {
            path.move_to(p);
            pen_down = true;
        }
    }
    path
}

fn grid_path(plot: Rect, divisions: u32) -> BezPath {
    let mut path = BezPath::new();
    let n = divisions.max(1);
    for i in 0..=n {
        let t = f64::from(i) / f64::from(n);
        let x = plot.x0 + t * plot.width();
        let y = plot.y0 + t * plot.height();
        path.move_to(Point::new(x, plot.y0));
        path.line_to(Point::new(x, plot.y1));
        path.move_to(Point::new(plot.x0, y));
        path.line_to(Point::new(plot.x1, y));
    }
    path
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/plot.rs"]
mod tests;
