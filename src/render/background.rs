//! Solid and linear-gradient background canvases.

use image::{Rgba, RgbaImage};

use crate::{
    composition::model::{BackgroundKind, BackgroundOverride},
    foundation::color::{GradientSpec, Rgba8, parse_color, parse_gradient},
};

/// Render a background override into a canvas of the requested size.
pub fn render_background(bg: &BackgroundOverride, width: u32, height: u32) -> RgbaImage {
    match bg.kind {
        BackgroundKind::Solid => solid(parse_color(&bg.color), width, height),
        BackgroundKind::Gradient => gradient(&parse_gradient(&bg.color), width, height),
    }
}

/// A solid fill canvas.
pub fn solid(color: Rgba8, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color.to_array()))
}

/// A linear gradient canvas.
///
/// Only the first and last stops are interpolated; intermediate stops are
/// ignored. Fewer than two stops degrades to a solid fill (white when the
/// spec carries no parsable color at all).
pub fn gradient(spec: &GradientSpec, width: u32, height: u32) -> RgbaImage {
    let Some(&first) = spec.stops.first() else {
        return solid(Rgba8::WHITE, width, height);
    };
    if spec.stops.len() < 2 {
        return solid(first, width, height);
    }
    let last = spec.stops[spec.stops.len() - 1];

    // Projection axis for the CSS angle convention (90deg = left-to-right).
    let angle_rad = (90.0 - spec.angle_deg).to_radians();
    let (dir_x, dir_y) = (angle_rad.cos(), angle_rad.sin());

    // Pixels are projected from a [-1, 1] square onto the axis; the linear
    // projection takes its extremes at the square's corners.
    let x_last = axis_coord(width, width.saturating_sub(1));
    let y_last = axis_coord(height, height.saturating_sub(1));
    let mut t_min = f64::INFINITY;
    let mut t_max = f64::NEG_INFINITY;
    for x in [-1.0, x_last] {
        for y in [-1.0, y_last] {
            let t = dir_x * x + dir_y * y;
            t_min = t_min.min(t);
            t_max = t_max.max(t);
        }
    }
    let span = t_max - t_min;

    RgbaImage::from_fn(width, height, |px, py| {
        let t = dir_x * axis_coord(width, px) + dir_y * axis_coord(height, py);
        let t = if span > 0.0 { (t - t_min) / span } else { 0.0 };
        Rgba([
            lerp_channel(first.r, last.r, t),
            lerp_channel(first.g, last.g, t),
            lerp_channel(first.b, last.b, t),
            lerp_channel(first.a, last.a, t),
        ])
    })
}

/// Evenly spaced coordinate in `[-1, 1]` including both endpoints.
fn axis_coord(len: u32, i: u32) -> f64 {
    if len > 1 {
        -1.0 + 2.0 * f64::from(i) / f64::from(len - 1)
    } else {
        -1.0
    }
}

/// Round-half-up channel interpolation (normative rounding rule).
fn lerp_channel(start: u8, end: u8, t: f64) -> u8 {
    (f64::from(start) * (1.0 - t) + f64::from(end) * t)
        .round()
        .clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
