//! Tagline rendering: a single caption drawn below the anchoring logo.

use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

use crate::{
    assets::store::AssetStore,
    composition::model::TaglineOverride,
    foundation::color::{Rgba8, try_parse_color},
    render::logo::PlacedLogo,
};

/// Font used when the tagline does not name one.
pub const DEFAULT_FONT_FILENAME: &str = "Montserrat-Regular.ttf";
/// Font size used when the tagline does not set one.
pub const DEFAULT_FONT_SIZE: f32 = 24.0;
/// Default gap between the anchoring logo and the caption.
const DEFAULT_OFFSET_Y: i64 = 5;
/// Fallback position when no logo was placed.
const FALLBACK_X: i64 = 20;
const FALLBACK_BOTTOM_GAP: i64 = 40;

/// Formats whose caption centers under the logo instead of left-aligning.
pub const CENTERED_CAPTION_FORMATS: [&str; 2] = ["SLOT1_NEXT_WEB", "SLOT1_NEXT_WEB_PRE"];

/// Draw a tagline onto the canvas.
///
/// Every failure path (missing font, bad font bytes) logs a warning and
/// leaves the canvas untouched; a caption must never sink a format.
pub fn draw_tagline(
    canvas: &mut RgbaImage,
    tagline: &TaglineOverride,
    store: &AssetStore,
    format_name: &str,
    anchor: Option<PlacedLogo>,
) {
    if tagline.text.is_empty() {
        return;
    }

    let font_filename = tagline.font_filename.as_deref().unwrap_or(DEFAULT_FONT_FILENAME);
    let font_bytes = match store.read_font(font_filename) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(format = format_name, font = font_filename, %err, "tagline font unavailable, skipping caption");
            return;
        }
    };
    let font = match FontRef::try_from_slice(&font_bytes) {
        Ok(font) => font,
        Err(err) => {
            tracing::warn!(format = format_name, font = font_filename, %err, "tagline font unusable, skipping caption");
            return;
        }
    };

    let size = tagline.font_size.unwrap_or(DEFAULT_FONT_SIZE);
    let color = tagline
        .color
        .as_deref()
        .and_then(try_parse_color)
        .unwrap_or(Rgba8::BLACK);

    let scale = PxScale::from(size);
    let scaled = font.as_scaled(scale);
    let text_width = measure_width(&font, scale, &tagline.text) as i64;

    let (x, y) = resolve_position(tagline, format_name, anchor, text_width, canvas.height());

    let baseline = y as f32 + scaled.ascent();
    let mut cursor = x as f32;
    let mut prev: Option<ab_glyph::GlyphId> = None;
    for c in tagline.text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            cursor += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, ab_glyph::point(cursor, baseline));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = gx as i64 + bounds.min.x as i64;
                let py = gy as i64 + bounds.min.y as i64;
                if px < 0 || py < 0 || px >= i64::from(canvas.width()) || py >= i64::from(canvas.height())
                {
                    return;
                }
                let alpha = (coverage * f32::from(color.a)) as u8;
                let top = Rgba([color.r, color.g, color.b, alpha]);
                let bottom = *canvas.get_pixel(px as u32, py as u32);
                canvas.put_pixel(px as u32, py as u32, blend_pixel(bottom, top));
            });
        }
        cursor += scaled.h_advance(id);
        prev = Some(id);
    }
}

/// Resolve the caption position.
///
/// Explicit `x, y` overrides win; otherwise the caption hangs below the
/// anchoring logo (centered under it for the exception formats); with no
/// anchor it lands at a fixed canvas-relative offset.
pub fn resolve_position(
    tagline: &TaglineOverride,
    format_name: &str,
    anchor: Option<PlacedLogo>,
    text_width: i64,
    canvas_height: u32,
) -> (i64, i64) {
    if let (Some(x), Some(y)) = (tagline.x, tagline.y) {
        return (x, y);
    }
    match anchor {
        Some(logo) => {
            let offset_y = tagline.offset_y.unwrap_or(DEFAULT_OFFSET_Y);
            let y = logo.y + i64::from(logo.height) + offset_y;
            let x = if CENTERED_CAPTION_FORMATS.contains(&format_name) {
                logo.x + (i64::from(logo.width) - text_width) / 2
            } else {
                logo.x
            };
            (x, y)
        }
        None => (FALLBACK_X, i64::from(canvas_height) - FALLBACK_BOTTOM_GAP),
    }
}

fn measure_width(font: &FontRef<'_>, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev: Option<ab_glyph::GlyphId> = None;
    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}

/// Straight-alpha source-over blend of two RGBA pixels.
fn blend_pixel(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let ta = f32::from(top[3]) / 255.0;
    let ba = f32::from(bottom[3]) / 255.0;
    let out_a = ta + ba * (1.0 - ta);
    if out_a < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }
    let ch = |t: u8, b: u8| -> u8 {
        let t = f32::from(t) / 255.0;
        let b = f32::from(b) / 255.0;
        (((t * ta + b * ba * (1.0 - ta)) / out_a) * 255.0) as u8
    };
    Rgba([
        ch(top[0], bottom[0]),
        ch(top[1], bottom[1]),
        ch(top[2], bottom[2]),
        (out_a * 255.0) as u8,
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
