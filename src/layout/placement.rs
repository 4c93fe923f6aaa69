//! Geometry engine: where the source image goes on a format canvas.
//!
//! Two modes, selected per rule set:
//!
//! - **centering-around-focus** — cover-fit the canvas and put the analysis
//!   focus point on the canvas center;
//! - **margin-aware subject framing** — when the rule reserves a composition
//!   area, scale so the focus point lands on the midpoint of that area and
//!   the subject box fills the vertical band between margins.
//!
//! Every candidate scale competes and the maximum wins: the subject is never
//! smaller than any individual constraint requires, at the cost of possible
//! over-cropping. Offsets are then clamped so the scaled image always covers
//! the canvas.

use crate::{
    analysis::subject::AnalysisResult,
    catalog::rules::{RuleSet, RuleType},
};

#[derive(Clone, Copy, Debug, PartialEq)]
/// Resolved placement of a source image on a canvas.
pub struct Placement {
    /// Selected scale factor (pre-clamp; clamping never changes scale).
    pub scale: f64,
    /// Paste x after clamping, in canvas pixels (may be negative).
    pub paste_x: i64,
    /// Paste y after clamping, in canvas pixels (may be negative).
    pub paste_y: i64,
    /// Scaled image width in pixels.
    pub scaled_width: u32,
    /// Scaled image height in pixels.
    pub scaled_height: u32,
}

/// Compute scale and paste offset for a source image on a canvas.
pub fn place(
    image_width: u32,
    image_height: u32,
    analysis: &AnalysisResult,
    canvas_width: u32,
    canvas_height: u32,
    rules: &RuleSet,
) -> Placement {
    let img_w = f64::from(image_width);
    let img_h = f64::from(image_height);
    let canvas_w = f64::from(canvas_width);
    let canvas_h = f64::from(canvas_height);
    let focus = analysis.focus_point;

    let framing = rules.has_composition_area() && rules.rule_type != RuleType::CenteredLogo;

    let (scale, paste_x, paste_y) = if framing {
        let margin = rules.margin();
        let margin_x = margin.x as f64;
        let margin_y = margin.y as f64;
        let logo_area_w = rules.logo_area.map_or(0.0, |a| f64::from(a.width));

        // Midpoint between the right edge of the reserved logo zone and the
        // right margin boundary.
        let target_x = (margin_x + logo_area_w + margin_y + (canvas_w - margin_y)) / 2.0;

        let scale_left = if focus.x > 0.0 {
            target_x / focus.x
        } else {
            1.0
        };
        let scale_right = if img_w - focus.x > 0.0 {
            (canvas_w - target_x) / (img_w - focus.x)
        } else {
            1.0
        };
        let scale_centering = scale_left.max(scale_right);

        let scale_framing = match analysis.main_box {
            Some(subject) => {
                let subject_h = subject.height();
                let band_h = canvas_h - margin_y * 2.0;
                if subject_h > 0.0 && band_h > 0.0 {
                    band_h / subject_h
                } else {
                    1.0
                }
            }
            None => 1.0,
        };

        let scale_cover = (canvas_w / img_w).max(canvas_h / img_h);
        let scale = scale_centering.max(scale_framing).max(scale_cover);

        let focus_x_scaled = (focus.x * scale) as i64;
        let paste_x = (target_x - focus_x_scaled as f64) as i64;
        let subject_top = analysis
            .main_box
            .map_or(analysis.subject_top_y, |subject| subject.y0);
        let paste_y = (margin_y - subject_top * scale) as i64;

        (scale, paste_x, paste_y)
    } else {
        let scale = (canvas_w / img_w).max(canvas_h / img_h);
        let focus_x_scaled = (focus.x * scale) as i64;
        let focus_y_scaled = (focus.y * scale) as i64;
        let paste_x = (canvas_w / 2.0 - focus_x_scaled as f64) as i64;
        let paste_y = (canvas_h / 2.0 - focus_y_scaled as f64) as i64;
        (scale, paste_x, paste_y)
    };

    let scaled_width = ((img_w * scale) as i64).max(1) as u32;
    let scaled_height = ((img_h * scale) as i64).max(1) as u32;

    // Clamp so the scaled image fully covers the canvas. A no-op whenever the
    // scaled size meets or exceeds the canvas, which cover-fit guarantees up
    // to integer truncation.
    let left_bound = i64::from(canvas_width) - i64::from(scaled_width);
    let top_bound = i64::from(canvas_height) - i64::from(scaled_height);
    let paste_x = left_bound.max(paste_x.min(0));
    let paste_y = top_bound.max(paste_y.min(0));

    Placement {
        scale,
        paste_x,
        paste_y,
        scaled_width,
        scaled_height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/placement.rs"]
mod tests;
