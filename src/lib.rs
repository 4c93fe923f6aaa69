//! Brandpress composes marketing imagery into a fixed catalog of branded
//! output formats.
//!
//! Given a source photo, a machine-generated subject analysis (focus point
//! and subject bounding box), one or more brand logos, and optional manual
//! overrides, the engine deterministically renders banners, slots, logo-only
//! variants, split layouts, and a composite delivery sheet.
//!
//! # Pipeline overview
//!
//! 1. **Load**: the [`FormatCatalog`] is parsed once and `copy` rules are
//!    resolved; the table is immutable afterwards.
//! 2. **Place**: per format, the geometry engine ([`place`]) selects a scale
//!    from competing subject-framing candidates and clamps the paste offset
//!    so the image always covers the canvas.
//! 3. **Compose**: the dispatcher ([`compose_format`]) renders background,
//!    image, logos, and tagline per rule type.
//! 4. **Assemble**: [`Composer::compose_batch`] runs the catalog for two
//!    assigned sources and derives the delivery sheet from the rendered trio.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical inputs produce identical pixels; list
//!   order is the only tie-break for multi-logo layouts.
//! - **Degrade, don't abort**: a bad logo, font, or color string degrades
//!   that element with a warning; only an unusable source image fails a
//!   format, and only that format.
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod analysis;
mod assets;
mod catalog;
mod composition;
mod foundation;
mod layout;
mod render;

pub use analysis::subject::{AnalysisResult, LogoShade, SubjectAnalyzer, suggest_logo_shade};
pub use assets::decode::{decode_image, decode_logo};
pub use assets::store::AssetStore;
pub use catalog::rules::{
    CompositionArea, FormatCatalog, FormatRule, LogoArea, Margin, RuleSet, RuleType,
};
pub use composition::model::{
    Assignments, BackgroundKind, BackgroundOverride, ColorFilter, CompositionData, CropOffset,
    FormatOutput, FormatOverride, ImageOverride, LogoOverride, LogoOverrides, OverrideMap,
    SourceId, TaglineOverride,
};
pub use foundation::color::{GradientSpec, Rgba8, parse_color, parse_gradient, try_parse_color};
pub use foundation::error::{BrandpressError, BrandpressResult};
pub use layout::placement::{Placement, place};
pub use render::annotate::annotate_placement;
pub use render::background::{gradient, render_background, solid};
pub use render::batch::{
    BatchRequest, BatchSources, Composer, DELIVERY_SHEET_NAME, DELIVERY_SHEET_PREREQUISITES,
    SourceImage,
};
pub use render::format::{OVERLAY_FORMATS, compose_format};
pub use render::logo::{
    FALLBACK_LOGO_WIDTH, LOGO_STACK_GAP, LogoSource, PlacedLogo, apply_color_filter,
    fill_canvas_with_logo, fit_within, place_logo_row, place_logos, trim_transparent,
};
pub use render::text::{
    CENTERED_CAPTION_FORMATS, DEFAULT_FONT_FILENAME, DEFAULT_FONT_SIZE, draw_tagline,
    resolve_position,
};
