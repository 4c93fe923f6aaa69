//! Per-rule-type composition of a single output format.

use image::{RgbaImage, imageops};

use crate::{
    analysis::subject::AnalysisResult,
    assets::store::AssetStore,
    catalog::rules::{FormatRule, RuleSet, RuleType},
    composition::model::{CompositionData, CropOffset, FormatOverride, ImageOverride},
    foundation::color::Rgba8,
    foundation::error::BrandpressResult,
    layout::placement::{Placement, place},
    render::background::{render_background, solid},
    render::logo::{LogoSource, fill_canvas_with_logo, place_logo_row, place_logos},
    render::text::draw_tagline,
};

/// Formats that receive the fixed semi-transparent dark overlay.
pub const OVERLAY_FORMATS: [&str; 2] = ["SLOT1_NEXT_WEB", "SLOT1_NEXT_WEB_PRE"];

/// Overlay strength: black at 191/255 over the placed image.
const OVERLAY_ALPHA: u8 = 191;

/// Default reserved panel width for split layouts.
const DEFAULT_SPLIT_WIDTH: u32 = 300;

/// Compose one format from a decoded source image and its analysis.
///
/// Returns the composed canvas plus placement metadata. Metadata is present
/// only when automatic or manual image placement ran; logo-only layouts
/// yield `None`.
pub fn compose_format(
    source: &RgbaImage,
    analysis: &AnalysisResult,
    format: &FormatRule,
    logos: &[LogoSource],
    overrides: &FormatOverride,
    store: &AssetStore,
) -> BrandpressResult<(RgbaImage, Option<CompositionData>)> {
    match format.rules.rule_type.effective() {
        RuleType::LogoOnlyCenteredWhiteBg => Ok(compose_logo_card(format, logos, overrides)),
        RuleType::SplitLeftWhite => compose_split(source, analysis, format, logos, overrides),
        _ => compose_general(source, analysis, format, logos, overrides, store),
    }
}

/// White canvas with logos as a centered row; no source image at all.
fn compose_logo_card(
    format: &FormatRule,
    logos: &[LogoSource],
    overrides: &FormatOverride,
) -> (RgbaImage, Option<CompositionData>) {
    let mut canvas = solid(Rgba8::WHITE, format.width, format.height);
    place_logo_row(&mut canvas, logos, &format.rules, overrides.logo.as_ref());
    (canvas, None)
}

/// White side panel with stacked logos; the image fills the remaining panel.
fn compose_split(
    source: &RgbaImage,
    analysis: &AnalysisResult,
    format: &FormatRule,
    logos: &[LogoSource],
    overrides: &FormatOverride,
) -> BrandpressResult<(RgbaImage, Option<CompositionData>)> {
    let rules = &format.rules;
    let split_width = rules.split_width.unwrap_or(DEFAULT_SPLIT_WIDTH);
    let mut canvas = solid(Rgba8::WHITE, format.width, format.height);

    let image_area_w = format.width.saturating_sub(split_width);
    let composition_data = if image_area_w == 0 {
        tracing::warn!(
            format = %format.name,
            split_width,
            "split panel leaves no image area, rendering panel only"
        );
        None
    } else {
        let mut panel = RgbaImage::new(image_area_w, format.height);
        let data = match &overrides.image {
            Some(manual) => {
                apply_manual_image(&mut panel, source, manual);
                Some(manual_data(manual))
            }
            None => {
                // The panel composes like a stand-alone full-bleed format.
                let panel_rules = RuleSet::default();
                Some(place_and_paste(&mut panel, source, analysis, &panel_rules))
            }
        };
        imageops::replace(&mut canvas, &panel, i64::from(split_width), 0);
        data
    };

    place_logos(
        &mut canvas,
        logos,
        rules,
        overrides.logo.as_ref(),
        rules.margin_or(20, 40),
    );

    Ok((canvas, composition_data))
}

/// Every other rule type: background, image, overlay, logos, tagline.
fn compose_general(
    source: &RgbaImage,
    analysis: &AnalysisResult,
    format: &FormatRule,
    logos: &[LogoSource],
    overrides: &FormatOverride,
    store: &AssetStore,
) -> BrandpressResult<(RgbaImage, Option<CompositionData>)> {
    let rules = &format.rules;
    let rule_type = rules.rule_type.effective();

    let mut canvas = match &overrides.background {
        Some(bg) => render_background(bg, format.width, format.height),
        None => solid(Rgba8::WHITE, format.width, format.height),
    };

    // A manual background replaces the photo entirely.
    let mut composition_data = None;
    if !rule_type.is_logo_only() && overrides.background.is_none() {
        composition_data = Some(match &overrides.image {
            Some(manual) => {
                apply_manual_image(&mut canvas, source, manual);
                manual_data(manual)
            }
            None => place_and_paste(&mut canvas, source, analysis, rules),
        });
    }

    if OVERLAY_FORMATS.contains(&format.name.as_str()) {
        darken(&mut canvas, OVERLAY_ALPHA);
    }

    let anchor = place_logos(
        &mut canvas,
        logos,
        rules,
        overrides.logo.as_ref(),
        rules.margin(),
    );

    if rule_type == RuleType::LogoOnlyFill {
        if let Some(first) = logos.first() {
            fill_canvas_with_logo(&mut canvas, first);
        }
    }

    if let Some(tagline) = &overrides.tagline {
        draw_tagline(&mut canvas, tagline, store, &format.name, anchor);
    }

    Ok((canvas, composition_data))
}

/// Run the placement engine and paste the scaled source onto the canvas.
fn place_and_paste(
    canvas: &mut RgbaImage,
    source: &RgbaImage,
    analysis: &AnalysisResult,
    rules: &RuleSet,
) -> CompositionData {
    let placement = place(
        source.width(),
        source.height(),
        analysis,
        canvas.width(),
        canvas.height(),
        rules,
    );
    let resized = imageops::resize(
        source,
        placement.scaled_width,
        placement.scaled_height,
        imageops::FilterType::Lanczos3,
    );
    imageops::overlay(canvas, &resized, placement.paste_x, placement.paste_y);
    placement_data(&placement)
}

/// Crop the override rectangle from the source and stretch it over the area.
fn apply_manual_image(canvas: &mut RgbaImage, source: &RgbaImage, ov: &ImageOverride) {
    let max_x = i64::from(source.width()) - 1;
    let max_y = i64::from(source.height()) - 1;
    let crop_x = ov.x.clamp(0, max_x.max(0)) as u32;
    let crop_y = ov.y.clamp(0, max_y.max(0)) as u32;
    let crop_w = ov
        .width
        .unwrap_or(source.width())
        .min(source.width() - crop_x)
        .max(1);
    let crop_h = ov
        .height
        .unwrap_or(source.height())
        .min(source.height() - crop_y)
        .max(1);

    let cropped = imageops::crop_imm(source, crop_x, crop_y, crop_w, crop_h).to_image();
    let resized = imageops::resize(
        &cropped,
        canvas.width(),
        canvas.height(),
        imageops::FilterType::Lanczos3,
    );
    imageops::replace(canvas, &resized, 0, 0);
}

/// Metadata for automatic placement: computed scale and post-clamp offsets.
fn placement_data(placement: &Placement) -> CompositionData {
    CompositionData {
        scale: Some(placement.scale),
        paste_x: Some(placement.paste_x),
        paste_y: Some(placement.paste_y),
        crop: Some(CropOffset { x: 0.0, y: 0.0 }),
        zoom: Some(placement.scale),
    }
}

/// Metadata for manual placement: the caller's literal values, never computed.
fn manual_data(ov: &ImageOverride) -> CompositionData {
    CompositionData {
        scale: ov.zoom,
        crop: ov.crop,
        ..CompositionData::default()
    }
}

/// Blend black at `alpha`/255 over every pixel, leaving opacity untouched.
fn darken(canvas: &mut RgbaImage, alpha: u8) {
    let keep = 255 - u16::from(alpha);
    for px in canvas.pixels_mut() {
        px[0] = ((u16::from(px[0]) * keep + 127) / 255) as u8;
        px[1] = ((u16::from(px[1]) * keep + 127) / 255) as u8;
        px[2] = ((u16::from(px[2]) * keep + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/format.rs"]
mod tests;
