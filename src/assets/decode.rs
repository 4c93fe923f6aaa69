use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{BrandpressError, BrandpressResult};

/// Decode encoded raster bytes into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> BrandpressResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Decode a logo file into straight-alpha RGBA8.
///
/// `.svg` files are parsed and rasterized at their intrinsic size; anything
/// else goes through the raster decoder.
pub fn decode_logo(filename: &str, bytes: &[u8]) -> BrandpressResult<RgbaImage> {
    if filename.to_ascii_lowercase().ends_with(".svg") {
        rasterize_svg(bytes)
    } else {
        decode_image(bytes)
    }
}

/// Rasterize SVG bytes at the document's intrinsic size.
fn rasterize_svg(bytes: &[u8]) -> BrandpressResult<RgbaImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    let size = tree.size();
    let width = svg_px(size.width())?;
    let height = svg_px(size.height())?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BrandpressError::asset("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    // tiny-skia pixels are premultiplied; the compositor works in straight alpha.
    let mut rgba = pixmap.data().to_vec();
    unpremultiply_rgba8_in_place(&mut rgba);
    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| BrandpressError::asset("svg pixmap byte length mismatch"))
}

fn svg_px(v: f32) -> BrandpressResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(BrandpressError::asset("svg has invalid width/height"));
    }
    Ok((v.ceil() as u32).max(1))
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
        px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
    }
}
