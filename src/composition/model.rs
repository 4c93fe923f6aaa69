use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
/// Which of the two batch source images a format is assigned to.
pub enum SourceId {
    /// The first uploaded source.
    #[serde(rename = "imageA")]
    A,
    /// The second uploaded source.
    #[serde(rename = "imageB")]
    B,
}

/// Assignment of catalog formats (keyed `NAME.jpg`) to source images.
pub type Assignments = BTreeMap<String, SourceId>;

/// Per-format manual overrides, keyed `NAME.jpg` like assignments.
pub type OverrideMap = BTreeMap<String, FormatOverride>;

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Caller-supplied partial configuration for one format.
///
/// Every field is independently optional; absence always falls back to the
/// automatic/derived value and never corrupts unrelated fields.
pub struct FormatOverride {
    /// Replace the canvas background (and thereby the source image).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<BackgroundOverride>,
    /// Manual crop rectangle instead of automatic placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageOverride>,
    /// Per-logo placement overrides, single or index-aligned list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoOverrides>,
    /// Caption text drawn after logo placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<TaglineOverride>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Manual background fill.
pub struct BackgroundOverride {
    /// Fill kind.
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    /// Color or gradient string (see [`crate::foundation::color`]).
    pub color: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Background fill kind.
pub enum BackgroundKind {
    /// Single solid color.
    Solid,
    /// Two-stop linear gradient.
    Gradient,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Manual image placement: crop a rectangle from the source and stretch it
/// over the full target area.
pub struct ImageOverride {
    /// Crop origin x in source pixels.
    #[serde(default)]
    pub x: i64,
    /// Crop origin y in source pixels.
    #[serde(default)]
    pub y: i64,
    /// Crop width; defaults to the full source width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Crop height; defaults to the full source height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Caller's zoom bookkeeping, echoed verbatim into composition metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    /// Caller's crop bookkeeping, echoed verbatim into composition metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropOffset>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A crop offset pair as tracked by the editing front-end.
pub struct CropOffset {
    /// Horizontal offset.
    pub x: f64,
    /// Vertical offset.
    pub y: f64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// A single logo override or an ordered list of them.
///
/// The list is index-aligned with the batch logo list and may be shorter;
/// logos past its end use fully automatic placement.
pub enum LogoOverrides {
    /// One override applying to the first logo.
    One(LogoOverride),
    /// Index-aligned overrides.
    Many(Vec<LogoOverride>),
}

impl LogoOverrides {
    /// Override for the logo at `index`, if provided.
    pub fn get(&self, index: usize) -> Option<&LogoOverride> {
        match self {
            LogoOverrides::One(single) => (index == 0).then_some(single),
            LogoOverrides::Many(list) => list.get(index),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Manual placement for one logo.
pub struct LogoOverride {
    /// Explicit paste x.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    /// Explicit paste y.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    /// Target width before aspect-preserving fit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Recolor the logo to solid white or black, preserving alpha.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_filter: Option<ColorFilter>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Solid recolor applied to a logo while keeping its alpha channel.
pub enum ColorFilter {
    /// Recolor to white.
    White,
    /// Recolor to black.
    Black,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Caption drawn onto the composed format.
pub struct TaglineOverride {
    /// Literal text to draw.
    pub text: String,
    /// Font file name inside the font store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_filename: Option<String>,
    /// Font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    /// Text color string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Explicit x, overriding anchor-derived placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    /// Explicit y, overriding anchor-derived placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    /// Gap below the anchoring logo.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_y: Option<i64>,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// How the source image ended up on the canvas.
///
/// Automatic placement fills every field; manual placement echoes only the
/// caller's literal `zoom`/`crop` values (as `scale`/`crop`) and leaves the
/// computed fields empty.
pub struct CompositionData {
    /// Applied scale factor (pre-clamp), or the caller's requested zoom.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Final paste x after clamping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paste_x: Option<i64>,
    /// Final paste y after clamping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paste_y: Option<i64>,
    /// Crop offset; `{0, 0}` for automatic placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropOffset>,
    /// Zoom bookkeeping mirror of `scale` for automatic placement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

#[derive(Clone, Debug)]
/// Composition output for one format: encoded bytes plus optional metadata.
pub struct FormatOutput {
    /// JPEG-encoded raster.
    pub image_bytes: Vec<u8>,
    /// Placement metadata; absent for pure logo-only and composite formats.
    pub composition_data: Option<CompositionData>,
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
