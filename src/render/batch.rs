//! Batch composition across the format catalog, plus the derived delivery
//! sheet assembled from already-rendered formats.

use std::collections::BTreeMap;

use image::{Rgba, RgbaImage, imageops};

use crate::{
    analysis::subject::{AnalysisResult, LogoShade, suggest_logo_shade},
    assets::{decode::decode_logo, store::AssetStore},
    catalog::rules::{FormatCatalog, FormatRule},
    composition::model::{Assignments, FormatOutput, FormatOverride, OverrideMap, SourceId},
    foundation::color::Rgba8,
    foundation::error::{BrandpressError, BrandpressResult},
    render::background::solid,
    render::format::compose_format,
    render::logo::{LogoSource, fit_within, trim_transparent},
    render::text::draw_tagline,
};

/// Output key of the composite delivery sheet.
pub const DELIVERY_SHEET_NAME: &str = "DELIVERY_SHEET.jpg";

/// The trio of formats the delivery sheet is assembled from, in sheet order.
pub const DELIVERY_SHEET_PREREQUISITES: [&str; 3] =
    ["SLOT1_WEB", "SHOWROOM_MOBILE", "HOME_PRIVATE"];

/// JPEG quality for every encoded output.
const JPEG_QUALITY: u8 = 90;

/// Conventional light-logo file names probed during automatic selection.
const LIGHT_LOGO_CANDIDATES: [&str; 3] = ["white.png", "branco.png", "logo_white.png"];
/// Conventional dark-logo file names probed during automatic selection.
const DARK_LOGO_CANDIDATES: [&str; 5] = [
    "dark.png",
    "preto.png",
    "logo_dark.png",
    "logo.png",
    "logo_color.png",
];

// Delivery sheet geometry. These constants are normative: the sheet is a
// fixed-size summary and does not adapt to its inputs.
const SHEET_WIDTH: u32 = 1400;
const SHEET_HEIGHT: u32 = 1960;
const SHEET_HEADER_H: u32 = 180;
const SHEET_WATERMARK_BOX: (u32, u32) = (300, 120);
const SHEET_WATERMARK_TOP: i64 = 30;
const SHEET_LABEL_SIZE: f32 = 28.0;
const SHEET_LABEL_INSET_X: i64 = 60;
const SHEET_LABEL_INSET_Y: i64 = 24;
const SHEET_CONTENT_TOP: i64 = 70;
const SHEET_CONTENT_W: u32 = 1240;
const SHEET_RULE_GRAY: Rgba<u8> = Rgba([180, 180, 180, 255]);
const MENU_STRIP_H: u32 = 48;

#[derive(Clone, Debug)]
/// A decoded batch source with its precomputed analysis.
pub struct SourceImage {
    /// Decoded source pixels.
    pub image: RgbaImage,
    /// Subject analysis produced by the external detector.
    pub analysis: AnalysisResult,
}

#[derive(Clone, Debug)]
/// The two sources a batch composes from.
pub struct BatchSources {
    /// Source assigned as `imageA`.
    pub image_a: SourceImage,
    /// Source assigned as `imageB`.
    pub image_b: SourceImage,
}

impl BatchSources {
    fn get(&self, id: SourceId) -> &SourceImage {
        match id {
            SourceId::A => &self.image_a,
            SourceId::B => &self.image_b,
        }
    }
}

#[derive(Clone, Debug)]
/// One batch composition request.
pub struct BatchRequest {
    /// Format-to-source assignment, keyed `NAME.jpg`.
    pub assignments: Assignments,
    /// Brand folder the batch draws logos from.
    pub logo_folder: String,
    /// Selected logo files inside the folder, in placement order. An empty
    /// list enables per-format automatic selection by logo-zone brightness.
    pub logo_filenames: Vec<String>,
    /// Per-format manual overrides, keyed `NAME.jpg`.
    pub overrides: OverrideMap,
}

#[derive(Clone, Debug)]
/// The per-process composition context: resolved catalog plus asset store.
pub struct Composer {
    catalog: FormatCatalog,
    store: AssetStore,
}

impl Composer {
    /// Build a composer from a resolved catalog and an asset store.
    pub fn new(catalog: FormatCatalog, store: AssetStore) -> Self {
        Self { catalog, store }
    }

    /// The resolved format catalog.
    pub fn catalog(&self) -> &FormatCatalog {
        &self.catalog
    }

    /// The asset store.
    pub fn store(&self) -> &AssetStore {
        &self.store
    }

    /// Decode a list of logos from a brand folder.
    ///
    /// Missing or corrupt files are skipped with a warning; they never abort
    /// the request.
    pub fn load_logos(&self, folder: &str, filenames: &[String]) -> Vec<LogoSource> {
        let mut logos = Vec::with_capacity(filenames.len());
        for filename in filenames {
            match self
                .store
                .read_logo(folder, filename)
                .and_then(|bytes| decode_logo(filename, &bytes))
            {
                Ok(image) => logos.push(LogoSource {
                    filename: filename.clone(),
                    image,
                }),
                Err(err) => {
                    tracing::warn!(folder, filename = %filename, %err, "skipping unusable logo");
                }
            }
        }
        logos
    }

    /// Compose a single catalog format to an encoded output.
    pub fn compose_one(
        &self,
        format_name: &str,
        source: &SourceImage,
        logos: &[LogoSource],
        overrides: &FormatOverride,
    ) -> BrandpressResult<FormatOutput> {
        let format = self.catalog.get(format_name).ok_or_else(|| {
            BrandpressError::composition(format!("unknown format '{format_name}'"))
        })?;
        let (canvas, composition_data) = compose_format(
            &source.image,
            &source.analysis,
            format,
            logos,
            overrides,
            &self.store,
        )?;
        Ok(FormatOutput {
            image_bytes: encode_jpeg(canvas)?,
            composition_data,
        })
    }

    /// Compose every assigned catalog format and, when its prerequisites all
    /// rendered, the derived delivery sheet.
    ///
    /// A format that fails to compose is logged and skipped; the rest of the
    /// batch is still returned.
    pub fn compose_batch(
        &self,
        sources: &BatchSources,
        request: &BatchRequest,
    ) -> BrandpressResult<BTreeMap<String, FormatOutput>> {
        let available = self.store.list_logos(&request.logo_folder)?;
        if available.is_empty() {
            return Err(BrandpressError::asset(format!(
                "no usable logos (.png, .svg) in folder '{}'",
                request.logo_folder
            )));
        }

        let selected = self.load_logos(&request.logo_folder, &request.logo_filenames);

        let mut outputs = BTreeMap::new();
        let mut sheet_inputs: BTreeMap<&str, RgbaImage> = BTreeMap::new();
        let mut first_logo: Option<LogoSource> = None;

        for format in self.catalog.iter() {
            let key = format!("{}.jpg", format.name);
            let Some(&source_id) = request.assignments.get(&key) else {
                continue;
            };
            let source = sources.get(source_id);
            let overrides = request.overrides.get(&key).cloned().unwrap_or_default();

            let auto;
            let logos: &[LogoSource] = if selected.is_empty() {
                auto = self.pick_logo_by_shade(source, format, &available, &request.logo_folder);
                &auto
            } else {
                &selected
            };
            if first_logo.is_none() {
                first_logo = logos.first().cloned();
            }

            match compose_format(
                &source.image,
                &source.analysis,
                format,
                logos,
                &overrides,
                &self.store,
            ) {
                Ok((canvas, composition_data)) => {
                    if DELIVERY_SHEET_PREREQUISITES.contains(&format.name.as_str()) {
                        sheet_inputs.insert(format.name.as_str(), canvas.clone());
                    }
                    match encode_jpeg(canvas) {
                        Ok(image_bytes) => {
                            outputs.insert(
                                key,
                                FormatOutput {
                                    image_bytes,
                                    composition_data,
                                },
                            );
                        }
                        Err(err) => {
                            tracing::error!(format = %format.name, %err, "encoding failed, skipping format");
                        }
                    }
                }
                Err(err) => {
                    tracing::error!(format = %format.name, %err, "composition failed, skipping format");
                }
            }
        }

        if DELIVERY_SHEET_PREREQUISITES
            .iter()
            .all(|name| sheet_inputs.contains_key(name))
        {
            let sheet = self.assemble_delivery_sheet(&sheet_inputs, first_logo.as_ref());
            match encode_jpeg(sheet) {
                Ok(image_bytes) => {
                    outputs.insert(
                        DELIVERY_SHEET_NAME.to_string(),
                        FormatOutput {
                            image_bytes,
                            composition_data: None,
                        },
                    );
                }
                Err(err) => {
                    tracing::error!(%err, "delivery sheet encoding failed, skipping");
                }
            }
        } else {
            tracing::warn!(
                missing = ?DELIVERY_SHEET_PREREQUISITES
                    .iter()
                    .filter(|name| !sheet_inputs.contains_key(*name))
                    .collect::<Vec<_>>(),
                "delivery sheet prerequisites incomplete, skipping composite"
            );
        }

        Ok(outputs)
    }

    /// Pick one logo for a format by the brightness of its reserved zone.
    fn pick_logo_by_shade(
        &self,
        source: &SourceImage,
        format: &FormatRule,
        available: &[String],
        folder: &str,
    ) -> Vec<LogoSource> {
        let candidates: &[&str] = match suggest_logo_shade(&source.image, &format.rules) {
            LogoShade::Light => &LIGHT_LOGO_CANDIDATES,
            LogoShade::Dark => &DARK_LOGO_CANDIDATES,
        };
        let chosen = candidates
            .iter()
            .copied()
            .find(|c| available.iter().any(|a| a.as_str() == *c))
            .map(|c| c.to_string())
            .or_else(|| {
                let fallback = available.first().cloned();
                if let Some(name) = &fallback {
                    tracing::warn!(format = %format.name, logo = %name, "no shade candidate found, using folder fallback");
                }
                fallback
            });
        match chosen {
            Some(name) => self.load_logos(folder, std::slice::from_ref(&name)),
            None => Vec::new(),
        }
    }

    /// Assemble the fixed-size delivery sheet from the prerequisite renders.
    fn assemble_delivery_sheet(
        &self,
        renders: &BTreeMap<&str, RgbaImage>,
        watermark: Option<&LogoSource>,
    ) -> RgbaImage {
        let mut sheet = solid(Rgba8::WHITE, SHEET_WIDTH, SHEET_HEIGHT);

        if let Some(logo) = watermark {
            let mark = fit_within(
                &trim_transparent(&logo.image),
                SHEET_WATERMARK_BOX.0,
                SHEET_WATERMARK_BOX.1,
            );
            let x = (i64::from(SHEET_WIDTH) - i64::from(mark.width())) / 2;
            imageops::overlay(&mut sheet, &mark, x, SHEET_WATERMARK_TOP);
        }

        rule_line(&mut sheet, i64::from(SHEET_HEADER_H) - 2);

        let section_h = i64::from(SHEET_HEIGHT - SHEET_HEADER_H) / 3;
        for (index, name) in DELIVERY_SHEET_PREREQUISITES.iter().enumerate() {
            let top = i64::from(SHEET_HEADER_H) + section_h * index as i64;
            self.draw_section_label(&mut sheet, name, top);

            let Some(render) = renders.get(name) else {
                continue;
            };
            let mut render = render.clone();
            if *name == "HOME_PRIVATE" {
                draw_menu_strip(&mut render);
            }
            let fit_h = (section_h - SHEET_CONTENT_TOP - 20).max(1) as u32;
            let scaled = fit_within(&render, SHEET_CONTENT_W, fit_h);
            let x = (i64::from(SHEET_WIDTH) - i64::from(scaled.width())) / 2;
            imageops::overlay(&mut sheet, &scaled, x, top + SHEET_CONTENT_TOP);

            if index + 1 < DELIVERY_SHEET_PREREQUISITES.len() {
                rule_line(&mut sheet, top + section_h - 2);
            }
        }

        sheet
    }

    fn draw_section_label(&self, sheet: &mut RgbaImage, label: &str, top: i64) {
        let tagline = crate::composition::model::TaglineOverride {
            text: label.to_string(),
            font_filename: None,
            font_size: Some(SHEET_LABEL_SIZE),
            color: Some("#333333".to_string()),
            x: Some(SHEET_LABEL_INSET_X),
            y: Some(top + SHEET_LABEL_INSET_Y),
            offset_y: None,
        };
        draw_tagline(sheet, &tagline, &self.store, DELIVERY_SHEET_NAME, None);
    }
}

/// Simulated navigation strip drawn over the top of the home render.
fn draw_menu_strip(render: &mut RgbaImage) {
    let strip_h = MENU_STRIP_H.min(render.height());
    for y in 0..strip_h {
        for x in 0..render.width() {
            let px = render.get_pixel_mut(x, y);
            for c in 0..3 {
                px[c] = ((u16::from(px[c]) * 95 + 127) / 255) as u8;
            }
        }
    }
    // four evenly spaced menu placeholders
    let item_w = render.width() / 8;
    let item_h = 12u32.min(strip_h);
    let y0 = (strip_h.saturating_sub(item_h)) / 2;
    for slot in 0..4u32 {
        let x0 = render.width() * (slot * 2 + 1) / 9;
        for y in y0..(y0 + item_h).min(render.height()) {
            for x in x0..(x0 + item_w).min(render.width()) {
                render.put_pixel(x, y, Rgba([230, 230, 230, 255]));
            }
        }
    }
}

/// Full-width 2px separator.
fn rule_line(sheet: &mut RgbaImage, y: i64) {
    for dy in 0..2i64 {
        let row = y + dy;
        if row < 0 || row >= i64::from(sheet.height()) {
            continue;
        }
        for x in 0..sheet.width() {
            sheet.put_pixel(x, row as u32, SHEET_RULE_GRAY);
        }
    }
}

/// Encode a composed canvas as JPEG at the fixed batch quality.
fn encode_jpeg(canvas: RgbaImage) -> BrandpressResult<Vec<u8>> {
    use anyhow::Context;

    let rgb = image::DynamicImage::ImageRgba8(canvas).to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    encoder.encode_image(&rgb).context("encode jpeg")?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/render/batch.rs"]
mod tests;
