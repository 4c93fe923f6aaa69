//! Visual debugging: draw the rule zones and analysis geometry on top of an
//! automatically placed image.

use image::{Rgba, RgbaImage, imageops};

use crate::{
    analysis::subject::AnalysisResult, catalog::rules::FormatRule, layout::placement::place,
};

const CANVAS_GRAY: Rgba<u8> = Rgba([200, 200, 200, 255]);
const LOGO_ZONE_FILL: Rgba<u8> = Rgba([0, 170, 255, 100]);
const LOGO_ZONE_EDGE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const COMP_AREA_FILL: Rgba<u8> = Rgba([126, 0, 230, 80]);
const COMP_AREA_EDGE: Rgba<u8> = Rgba([128, 0, 128, 255]);
const SUBJECT_EDGE: Rgba<u8> = Rgba([0, 200, 0, 255]);
const FOCUS_DOT: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Render the automatic placement for a format with its rule zones, subject
/// box, and focus point drawn on top.
pub fn annotate_placement(
    source: &RgbaImage,
    analysis: &AnalysisResult,
    format: &FormatRule,
) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(format.width, format.height, CANVAS_GRAY);
    let rules = &format.rules;

    let placement = place(
        source.width(),
        source.height(),
        analysis,
        format.width,
        format.height,
        rules,
    );
    let resized = imageops::resize(
        source,
        placement.scaled_width,
        placement.scaled_height,
        imageops::FilterType::Lanczos3,
    );
    imageops::overlay(&mut canvas, &resized, placement.paste_x, placement.paste_y);

    if let Some(area) = rules.logo_area {
        let margin = rules.margin();
        let x1 = margin.x + i64::from(area.width);
        let y1 = margin.y + i64::from(area.height);
        fill_rect(&mut canvas, margin.x, margin.y, x1, y1, LOGO_ZONE_FILL);
        outline_rect(&mut canvas, margin.x, margin.y, x1, y1, 2, LOGO_ZONE_EDGE);

        if rules.has_composition_area() {
            let cx0 = margin.x + i64::from(area.width) + margin.y;
            let cx1 = i64::from(format.width) - margin.y;
            let cy1 = i64::from(format.height) - margin.y;
            fill_rect(&mut canvas, cx0, margin.y, cx1, cy1, COMP_AREA_FILL);
            outline_rect(&mut canvas, cx0, margin.y, cx1, cy1, 2, COMP_AREA_EDGE);
        }
    }

    let to_canvas = |v: f64, offset: i64| (v * placement.scale) as i64 + offset;
    if let Some(subject) = analysis.main_box {
        outline_rect(
            &mut canvas,
            to_canvas(subject.x0, placement.paste_x),
            to_canvas(subject.y0, placement.paste_y),
            to_canvas(subject.x1, placement.paste_x),
            to_canvas(subject.y1, placement.paste_y),
            3,
            SUBJECT_EDGE,
        );
    }

    let fx = to_canvas(analysis.focus_point.x, placement.paste_x);
    let fy = to_canvas(analysis.focus_point.y, placement.paste_y);
    fill_circle(&mut canvas, fx, fy, 8, FOCUS_DOT);

    canvas
}

fn blend_at(canvas: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
    if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }
    let px = canvas.get_pixel_mut(x as u32, y as u32);
    let a = u16::from(color[3]);
    for c in 0..3 {
        px[c] = ((u16::from(color[c]) * a + u16::from(px[c]) * (255 - a) + 127) / 255) as u8;
    }
}

fn fill_rect(canvas: &mut RgbaImage, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgba<u8>) {
    for y in y0..y1 {
        for x in x0..x1 {
            blend_at(canvas, x, y, color);
        }
    }
}

fn outline_rect(
    canvas: &mut RgbaImage,
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
    width: i64,
    color: Rgba<u8>,
) {
    for w in 0..width {
        for x in x0..x1 {
            blend_at(canvas, x, y0 + w, color);
            blend_at(canvas, x, y1 - 1 - w, color);
        }
        for y in y0..y1 {
            blend_at(canvas, x0 + w, y, color);
            blend_at(canvas, x1 - 1 - w, y, color);
        }
    }
}

fn fill_circle(canvas: &mut RgbaImage, cx: i64, cy: i64, radius: i64, color: Rgba<u8>) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                blend_at(canvas, cx + dx, cy + dy, color);
            }
        }
    }
}
