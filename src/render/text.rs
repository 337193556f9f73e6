use std::fmt::Write as _;
use std::sync::Arc;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{FourierError, FourierResult};

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Anchor {
    Start,
    Middle,
}

impl Anchor {
    fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
        }
    }
}

/// One line of text placed at a baseline point in canvas pixels.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Label {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) text: String,
    pub(crate) size: f64,
    pub(crate) color: Rgba8,
    pub(crate) anchor: Anchor,
}

/// Rasterizes text labels through an SVG document so glyph shaping stays with usvg.
///
/// Fonts are resolved from the system font database, loaded once per rasterizer. With no usable
/// fonts the labels are dropped and the layer is transparent.
pub(crate) struct LabelRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl LabelRasterizer {
    pub(crate) fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.len(), "label font database loaded");
        Self {
            fontdb: Arc::new(db),
        }
    }

    /// Premultiplied RGBA8 layer of `canvas` size holding `labels`.
    pub(crate) fn rasterize(&self, canvas: Canvas, labels: &[Label]) -> FourierResult<Vec<u8>> {
        let svg = labels_svg(canvas, labels);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|e| FourierError::render(format!("parse label svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| FourierError::render("failed to allocate label pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::default(),
            &mut pixmap.as_mut(),
        );
        Ok(pixmap.data().to_vec())
    }
}

pub(crate) fn labels_svg(canvas: Canvas, labels: &[Label]) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = canvas.width,
        h = canvas.height
    );
    for l in labels {
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-family="sans-serif" font-size="{:.1}" fill="{}" fill-opacity="{:.3}" text-anchor="{}">{}</text>"#,
            l.x,
            l.y,
            l.size,
            l.color.to_hex(),
            f64::from(l.color.a) / 255.0,
            l.anchor.as_svg(),
            escape_xml(&l.text)
        );
    }
    svg.push_str("</svg>");
    svg
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}
