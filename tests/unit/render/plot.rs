use std::f64::consts::PI;

use super::*;
use crate::foundation::core::{Interval, SampleDomain};
use crate::quadrature::adaptive::AdaptiveQuadrature;
use crate::series::synth::synthesize;

fn small_style() -> PlotStyle {
    PlotStyle {
        canvas: Canvas {
            width: 160,
            height: 120,
        },
        margin: 12.0,
        font_size: 10.0,
        ..PlotStyle::default()
    }
}

fn frames(k: i64) -> Vec<Frame> {
    let q = AdaptiveQuadrature::default();
    let domain = SampleDomain::linspace(Interval::SYMMETRIC_PI, 200).unwrap();
    synthesize(&q, |t| t * t, Interval::SYMMETRIC_PI, k, &domain)
        .unwrap()
        .collect::<FourierResult<_>>()
        .unwrap()
}

#[test]
fn renders_opaque_frame_of_canvas_size() {
    let mut r = PlotRenderer::new(small_style()).unwrap();
    assert_eq!(r.style(), &small_style());
    let frame = &frames(1)[0];
    let out = r.render(frame).unwrap();
    assert_eq!((out.width, out.height), (160, 120));
    assert_eq!(out.data.len(), 160 * 120 * 4);
    assert!(!out.premultiplied);
    assert!(out.data.chunks_exact(4).all(|px| px[3] == 255));
    // Corner pixel is the page background.
    assert_eq!(out.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn curves_leave_marks_inside_plot_area() {
    let style = small_style();
    let plot_bg = style.plot_background;
    let mut r = PlotRenderer::new(style).unwrap();
    let out = r.render(&frames(2)[1]).unwrap();

    let non_background = out
        .data
        .chunks_exact(4)
        .filter(|px| {
            let c = [px[0], px[1], px[2]];
            c != [255, 255, 255] && c != [plot_bg.r, plot_bg.g, plot_bg.b]
        })
        .count();
    assert!(non_background > 200, "only {non_background} drawn pixels");
}

#[test]
fn y_range_is_sticky_and_padded() {
    let fs = frames(3);
    let mut r = PlotRenderer::new(small_style()).unwrap();
    assert_eq!(r.y_range(), None);

    r.render(&fs[0]).unwrap();
    let (lo, hi) = r.y_range().unwrap();
    assert!(hi > PI * PI, "target max must be inside the range");
    assert!(lo < 0.0);

    r.render(&fs[2]).unwrap();
    let (lo2, hi2) = r.y_range().unwrap();
    assert!(lo2 <= lo && hi2 >= hi);
}

#[test]
fn style_validation() {
    assert!(PlotStyle::default().validate().is_ok());

    let empty_palette = PlotStyle {
        palette: vec![],
        ..PlotStyle::default()
    };
    assert!(PlotRenderer::new(empty_palette).is_err());

    let huge_margin = PlotStyle {
        margin: 400.0,
        ..PlotStyle::default()
    };
    assert!(huge_margin.validate().is_err());
}

#[test]
fn palette_cycles_by_harmonic() {
    let style = PlotStyle::default();
    let n = style.palette.len() as u32;
    assert_eq!(style.series_color(1), style.palette[0]);
    assert_eq!(style.series_color(n + 1), style.palette[0]);
    assert_eq!(style.series_color(2), style.palette[1]);
}

#[test]
fn data_transform_flips_y() {
    let plot = Rect::new(10.0, 20.0, 110.0, 220.0);
    let t = data_to_pixels(plot, (-1.0, 1.0), (0.0, 4.0));
    let bottom_left = t * Point::new(-1.0, 0.0);
    let top_right = t * Point::new(1.0, 4.0);
    assert!((bottom_left.x - 10.0).abs() < 1e-12 && (bottom_left.y - 220.0).abs() < 1e-12);
    assert!((top_right.x - 110.0).abs() < 1e-12 && (top_right.y - 20.0).abs() < 1e-12);
}

#[test]
fn polyline_breaks_on_non_finite_values() {
    let xs = [0.0, 1.0, 2.0, 3.0];
    let ys = [0.0, f64::NAN, 1.0, 2.0];
    let path = polyline(&xs, &ys, Affine::IDENTITY);
    let moves = path
        .elements()
        .iter()
        .filter(|e| matches!(e, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 2);
}

#[test]
fn mismatched_frame_is_rejected() {
    let mut frame = frames(1).remove(0);
    frame.partial_sum.pop();
    let mut r = PlotRenderer::new(small_style()).unwrap();
    assert!(matches!(r.render(&frame), Err(FourierError::Render(_))));
}
