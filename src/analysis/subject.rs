use image::RgbaImage;
use kurbo::{Point, Rect};

use crate::{catalog::rules::RuleSet, foundation::error::BrandpressResult};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Machine-generated subject analysis for one source image.
///
/// Produced once per source by an external detector (see [`SubjectAnalyzer`])
/// and read-only afterwards; every format assigned to that source shares the
/// same result.
pub struct AnalysisResult {
    /// Subject-weighted anchor the engine centers imagery around.
    pub focus_point: Point,
    /// Bounding box of the dominant detected subject, if any.
    #[serde(default)]
    pub main_box: Option<Rect>,
    /// Fallback top coordinate of the subject when no box was detected.
    #[serde(default)]
    pub subject_top_y: f64,
    /// Source image width in pixels.
    pub image_width: u32,
    /// Source image height in pixels.
    pub image_height: u32,
}

impl AnalysisResult {
    /// A neutral result for subject-less images: focus at the image center,
    /// no box, subject top at 0.
    pub fn centered(image_width: u32, image_height: u32) -> Self {
        Self {
            focus_point: Point::new(
                f64::from(image_width) / 2.0,
                f64::from(image_height) / 2.0,
            ),
            main_box: None,
            subject_top_y: 0.0,
            image_width,
            image_height,
        }
    }
}

/// Seam to the external subject detector.
///
/// Implementations must return `main_box = None` gracefully for subject-less
/// images rather than erroring. The composition core never invokes this
/// during a batch; analysis is an already-completed input by then.
pub trait SubjectAnalyzer {
    /// Analyze encoded image bytes into an [`AnalysisResult`].
    fn analyze(&self, image_bytes: &[u8]) -> BrandpressResult<AnalysisResult>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which logo variant suits the zone it will be placed on.
pub enum LogoShade {
    /// The zone is dark; use a light logo.
    Light,
    /// The zone is light; use a dark logo.
    Dark,
}

/// Mean luma threshold below which the logo zone counts as dark.
const SHADE_THRESHOLD: f64 = 115.0;

/// Inspect the brightness of the reserved logo zone to decide between light
/// and dark logo variants.
///
/// Rules without a margin and logo area have no defined zone; the dark
/// variant is the safe default there.
pub fn suggest_logo_shade(image: &RgbaImage, rules: &RuleSet) -> LogoShade {
    let (Some(margin), Some(logo_area)) = (rules.margin, rules.logo_area) else {
        return LogoShade::Dark;
    };

    let x0 = margin.x.clamp(0, i64::from(image.width())) as u32;
    let y0 = margin.y.clamp(0, i64::from(image.height())) as u32;
    let x1 = (margin.x + i64::from(logo_area.width)).clamp(0, i64::from(image.width())) as u32;
    let y1 = (margin.y + i64::from(logo_area.height)).clamp(0, i64::from(image.height())) as u32;
    if x1 <= x0 || y1 <= y0 {
        return LogoShade::Dark;
    }

    let mut sum = 0.0f64;
    for y in y0..y1 {
        for x in x0..x1 {
            let px = image.get_pixel(x, y);
            sum += 0.299 * f64::from(px[0]) + 0.587 * f64::from(px[1]) + 0.114 * f64::from(px[2]);
        }
    }
    let mean = sum / (f64::from(x1 - x0) * f64::from(y1 - y0));

    if mean < SHADE_THRESHOLD {
        LogoShade::Light
    } else {
        LogoShade::Dark
    }
}
