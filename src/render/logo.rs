//! Logo compositing: recolor, trim, fit, and place one or more brand logos.

use image::{Rgba, RgbaImage, imageops};

use crate::{
    catalog::rules::{Margin, RuleSet, RuleType},
    composition::model::{ColorFilter, LogoOverrides},
};

/// Fallback fit box when neither an override width nor a rule logo area is
/// available.
pub const FALLBACK_LOGO_WIDTH: u32 = 150;

/// Vertical gap between stacked logos, in pixels.
pub const LOGO_STACK_GAP: i64 = 15;

#[derive(Clone, Debug)]
/// A decoded logo ready for compositing.
pub struct LogoSource {
    /// Original file name, kept for diagnostics.
    pub filename: String,
    /// Decoded straight-alpha pixels.
    pub image: RgbaImage,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Final placement of a composited logo, the tagline anchor.
pub struct PlacedLogo {
    /// Paste x on the canvas.
    pub x: i64,
    /// Paste y on the canvas.
    pub y: i64,
    /// Rendered width.
    pub width: u32,
    /// Rendered height.
    pub height: u32,
}

/// Recolor a logo to solid white or black while preserving its alpha channel.
pub fn apply_color_filter(image: &RgbaImage, filter: ColorFilter) -> RgbaImage {
    let level = match filter {
        ColorFilter::White => 255,
        ColorFilter::Black => 0,
    };
    let mut out = image.clone();
    for px in out.pixels_mut() {
        px[0] = level;
        px[1] = level;
        px[2] = level;
    }
    out
}

/// Crop a logo to the tightest bounding box of its non-transparent pixels.
///
/// A fully transparent image is returned unchanged; trimming an already
/// tight logo is a no-op.
pub fn trim_transparent(image: &RgbaImage) -> RgbaImage {
    let (w, h) = image.dimensions();
    let mut min_x = w;
    let mut min_y = h;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut seen = false;
    for (x, y, px) in image.enumerate_pixels() {
        if px[3] > 0 {
            seen = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }
    if !seen {
        return image.clone();
    }
    imageops::crop_imm(image, min_x, min_y, max_x - min_x + 1, max_y - min_y + 1).to_image()
}

/// Shrink a logo to fit within a box, preserving aspect ratio.
///
/// Never enlarges: a logo already inside the box keeps its natural size.
pub fn fit_within(image: &RgbaImage, max_width: u32, max_height: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w <= max_width && h <= max_height {
        return image.clone();
    }
    let ratio = (f64::from(max_width) / f64::from(w)).min(f64::from(max_height) / f64::from(h));
    let new_w = ((f64::from(w) * ratio).round() as u32).max(1);
    let new_h = ((f64::from(h) * ratio).round() as u32).max(1);
    imageops::resize(image, new_w, new_h, imageops::FilterType::Lanczos3)
}

/// Place the logo list onto a canvas per the format rules and overrides.
///
/// Returns the first logo's final placement for the tagline renderer to
/// anchor against. `full_bleed` and `logo_only_fill` rules place nothing.
pub fn place_logos(
    canvas: &mut RgbaImage,
    logos: &[LogoSource],
    rules: &RuleSet,
    overrides: Option<&LogoOverrides>,
    margin: Margin,
) -> Option<PlacedLogo> {
    if matches!(
        rules.rule_type.effective(),
        RuleType::FullBleed | RuleType::LogoOnlyFill
    ) {
        return None;
    }

    let multi = logos.len() > 1;
    let mut first: Option<PlacedLogo> = None;
    let mut stack_y = margin.y;

    for (index, logo) in logos.iter().enumerate() {
        let ov = overrides.and_then(|o| o.get(index));

        let mut img = match ov.and_then(|o| o.color_filter) {
            Some(filter) => apply_color_filter(&logo.image, filter),
            None => logo.image.clone(),
        };
        img = trim_transparent(&img);

        let sized = match ov.and_then(|o| o.width) {
            Some(width) => fit_within(&img, width, u32::MAX),
            None => match rules.logo_area {
                Some(area) => fit_within(&img, area.width, area.height),
                None => fit_within(&img, FALLBACK_LOGO_WIDTH, FALLBACK_LOGO_WIDTH),
            },
        };
        let (w, h) = sized.dimensions();

        let (x, y) = match (ov.and_then(|o| o.x), ov.and_then(|o| o.y)) {
            (Some(x), Some(y)) => (x, y),
            _ if multi => (margin.x, stack_y),
            _ => match rules.rule_type.effective() {
                RuleType::LogoOnlyCentered | RuleType::CenteredLogo => (
                    (i64::from(canvas.width()) - i64::from(w)) / 2,
                    (i64::from(canvas.height()) - i64::from(h)) / 2,
                ),
                _ => (margin.x, margin.y),
            },
        };

        imageops::overlay(canvas, &sized, x, y);
        if first.is_none() {
            first = Some(PlacedLogo {
                x,
                y,
                width: w,
                height: h,
            });
        }
        stack_y = y + i64::from(h) + LOGO_STACK_GAP;
    }

    first
}

/// Place logos as one horizontally centered row (white-background brand card).
pub fn place_logo_row(
    canvas: &mut RgbaImage,
    logos: &[LogoSource],
    rules: &RuleSet,
    overrides: Option<&LogoOverrides>,
) -> Option<PlacedLogo> {
    let mut sized = Vec::with_capacity(logos.len());
    for (index, logo) in logos.iter().enumerate() {
        let ov = overrides.and_then(|o| o.get(index));
        let mut img = match ov.and_then(|o| o.color_filter) {
            Some(filter) => apply_color_filter(&logo.image, filter),
            None => logo.image.clone(),
        };
        img = trim_transparent(&img);
        let img = match rules.logo_area {
            Some(area) => fit_within(&img, area.width, area.height),
            None => fit_within(&img, canvas.width(), canvas.height()),
        };
        sized.push(img);
    }
    if sized.is_empty() {
        return None;
    }

    let total_w: i64 = sized.iter().map(|i| i64::from(i.width())).sum::<i64>()
        + LOGO_STACK_GAP * (sized.len() as i64 - 1);
    let mut x = (i64::from(canvas.width()) - total_w) / 2;
    let mut first = None;

    for img in &sized {
        let y = (i64::from(canvas.height()) - i64::from(img.height())) / 2;
        imageops::overlay(canvas, img, x, y);
        if first.is_none() {
            first = Some(PlacedLogo {
                x,
                y,
                width: img.width(),
                height: img.height(),
            });
        }
        x += i64::from(img.width()) + LOGO_STACK_GAP;
    }
    first
}

/// Stretch a single logo over the whole canvas with no alpha masking.
pub fn fill_canvas_with_logo(canvas: &mut RgbaImage, logo: &LogoSource) {
    let resized = imageops::resize(
        &logo.image,
        canvas.width(),
        canvas.height(),
        imageops::FilterType::Lanczos3,
    );
    imageops::replace(canvas, &resized, 0, 0);
}

#[cfg(test)]
#[path = "../../tests/unit/render/logo.rs"]
mod tests;
