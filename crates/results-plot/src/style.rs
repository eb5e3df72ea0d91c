//! Marker shapes and colours for method series.

use std::f64::consts::{FRAC_PI_2, TAU};

use plotters::style::RGBColor;
use results_core::error::Result;
use results_core::methods::{Marker, MethodStyle};

/// Opacity of method lines and markers.
pub const LINE_ALPHA: f64 = 0.85;

/// Opacity of confidence bands.
pub const BAND_ALPHA: f64 = 0.15;

/// Line width in points.
pub const LINE_WIDTH_PT: f64 = 2.5;

/// Marker size (diameter) in points.
pub const MARKER_SIZE_PT: f64 = 9.0;

/// Plotters colour of a method.
pub fn method_color(style: &MethodStyle) -> Result<RGBColor> {
    let (r, g, b) = style.rgb()?;
    Ok(RGBColor(r, g, b))
}

/// Vertices of `marker` around the origin, in backend pixels (y grows down).
///
/// `radius` is half the marker size. Every marker is a closed polygon so a
/// single drawing path serves all shapes.
pub fn marker_outline(marker: Marker, radius: i32) -> Vec<(i32, i32)> {
    let r = f64::from(radius.max(1));
    match marker {
        Marker::Circle => regular_polygon(20, r, 0.0),
        Marker::Triangle => regular_polygon(3, r, 0.0),
        Marker::Diamond => regular_polygon(4, r, 0.0),
        Marker::Square => regular_polygon(4, r * 1.2, TAU / 8.0),
        Marker::Star => (0..10)
            .map(|i| {
                let radius = if i % 2 == 0 { r * 1.2 } else { r * 0.5 };
                vertex(radius, -FRAC_PI_2 + TAU * f64::from(i) / 10.0)
            })
            .collect(),
    }
}

/// `sides` evenly spaced vertices starting straight up, rotated by `offset`.
fn regular_polygon(sides: u32, radius: f64, offset: f64) -> Vec<(i32, i32)> {
    (0..sides)
        .map(|i| vertex(radius, -FRAC_PI_2 + offset + TAU * f64::from(i) / f64::from(sides)))
        .collect()
}

fn vertex(radius: f64, angle: f64) -> (i32, i32) {
    (
        (radius * angle.cos()).round() as i32,
        (radius * angle.sin()).round() as i32,
    )
}
