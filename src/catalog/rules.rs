use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{BrandpressError, BrandpressResult};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One output format of the catalog: canvas size plus its layout rule set.
pub struct FormatRule {
    /// Unique format name (also the output file stem).
    pub name: String,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Layout rules driving the dispatcher and the placement engine.
    #[serde(default)]
    pub rules: RuleSet,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Layout rule set for a single format.
pub struct RuleSet {
    /// Layout variant selector.
    #[serde(rename = "type", default)]
    pub rule_type: RuleType,
    /// Outer margin; `x` applies left of the logo zone, `y` everywhere else.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    /// Reserved logo zone dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_area: Option<LogoArea>,
    /// Presence enables margin-aware subject framing for standard layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition_area: Option<CompositionArea>,
    /// Reserved panel width for split layouts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_width: Option<u32>,
    /// Source format name, only meaningful for `type = "copy"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl RuleSet {
    /// Margin with the engine-wide `{20, 20}` default.
    pub fn margin(&self) -> Margin {
        self.margin_or(20, 20)
    }

    /// Margin with a caller-chosen default (split panels default `{20, 40}`).
    pub fn margin_or(&self, x: i64, y: i64) -> Margin {
        self.margin.unwrap_or(Margin { x, y })
    }

    /// Whether the rule reserves a composition area next to the logo zone.
    pub fn has_composition_area(&self) -> bool {
        self.composition_area.is_some()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Closed set of layout variants. Unrecognized strings land on [`RuleType::Unknown`],
/// which dispatches exactly like [`RuleType::Standard`].
pub enum RuleType {
    /// Cover-fit image, no logos.
    #[default]
    FullBleed,
    /// Image framed around the subject with a reserved logo zone.
    Standard,
    /// Image centered around the focus point with a canvas-centered logo.
    CenteredLogo,
    /// Logos only, canvas-centered.
    LogoOnlyCentered,
    /// A single logo stretched over the whole canvas, no alpha masking.
    LogoOnlyFill,
    /// Logos only, centered as a row on a white canvas.
    LogoOnlyCenteredWhiteBg,
    /// White side panel with stacked logos, image filling the rest.
    SplitLeftWhite,
    /// Placeholder resolved at load time by substituting another format's rules.
    Copy,
    /// Catch-all for unrecognized rule type strings.
    #[serde(other)]
    Unknown,
}

impl RuleType {
    /// Variants that never place the source image.
    pub fn is_logo_only(self) -> bool {
        matches!(
            self,
            RuleType::LogoOnlyCentered | RuleType::LogoOnlyFill | RuleType::LogoOnlyCenteredWhiteBg
        )
    }

    /// The handler actually used for dispatch.
    ///
    /// `Unknown` strings and unresolved `copy` rules both fall back to the
    /// standard handler.
    pub fn effective(self) -> RuleType {
        match self {
            RuleType::Copy | RuleType::Unknown => RuleType::Standard,
            other => other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Outer margin in pixels.
pub struct Margin {
    /// Horizontal margin on the logo side.
    pub x: i64,
    /// Vertical margin, also used as the right-edge margin by the engine.
    pub y: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Reserved logo zone dimensions in pixels.
pub struct LogoArea {
    /// Zone width.
    pub width: u32,
    /// Zone height.
    pub height: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Marker object: its presence in a rule set switches the placement engine
/// into margin-aware subject framing. Carries no fields of its own.
pub struct CompositionArea {}

#[derive(serde::Deserialize)]
struct CatalogFile {
    formats: Vec<FormatRule>,
}

#[derive(Clone, Debug, Default)]
/// The resolved, immutable format catalog.
///
/// Loaded once at process start; `copy` rules are substituted during load and
/// the table is never mutated afterwards.
pub struct FormatCatalog {
    formats: Vec<FormatRule>,
}

impl FormatCatalog {
    /// An empty catalog, the degraded mode for unreadable configuration.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and resolve a catalog from its JSON document.
    pub fn from_json(json: &str) -> BrandpressResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)
            .map_err(|e| BrandpressError::serde(format!("format catalog: {e}")))?;
        let mut formats = file.formats;
        for fmt in &formats {
            if fmt.width == 0 || fmt.height == 0 {
                return Err(BrandpressError::catalog(format!(
                    "format '{}' has a zero dimension",
                    fmt.name
                )));
            }
        }
        resolve_copy_rules(&mut formats);
        Ok(Self { formats })
    }

    /// Load a catalog from disk.
    ///
    /// An unreadable or malformed file logs an error and yields an empty
    /// catalog: every subsequent batch legitimately produces zero formats
    /// instead of crashing the process.
    pub fn load(path: &Path) -> Self {
        let loaded = std::fs::read_to_string(path)
            .context("read format catalog")
            .map_err(BrandpressError::from)
            .and_then(|json| Self::from_json(&json));
        match loaded {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!(path = %path.display(), %err, "format catalog unusable, running with an empty table");
                Self::empty()
            }
        }
    }

    /// Look up a format by name.
    pub fn get(&self, name: &str) -> Option<&FormatRule> {
        self.formats.iter().find(|f| f.name == name)
    }

    /// Formats in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &FormatRule> {
        self.formats.iter()
    }

    /// Number of formats.
    pub fn len(&self) -> usize {
        self.formats.len()
    }

    /// Whether the catalog is empty (degraded mode or trivial config).
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

/// Substitute `copy` rule sets from their named source format, exactly once.
///
/// Substitution reads the pre-resolution snapshot, so a copy of a copy stays
/// unresolved (and is logged) rather than chasing chains.
fn resolve_copy_rules(formats: &mut [FormatRule]) {
    let snapshot: Vec<(String, RuleSet)> = formats
        .iter()
        .map(|f| (f.name.clone(), f.rules.clone()))
        .collect();

    for fmt in formats.iter_mut() {
        if fmt.rules.rule_type != RuleType::Copy {
            continue;
        }
        let Some(source) = fmt.rules.source.as_deref() else {
            tracing::warn!(format = %fmt.name, "copy rule without a source format");
            continue;
        };
        match snapshot.iter().find(|(name, _)| name == source) {
            Some((_, rules)) if rules.rule_type != RuleType::Copy => {
                fmt.rules = rules.clone();
            }
            Some(_) => {
                tracing::warn!(format = %fmt.name, %source, "copy rule source is itself a copy; left unresolved");
            }
            None => {
                tracing::warn!(format = %fmt.name, %source, "copy rule references an unknown source format");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/rules.rs"]
mod tests;
