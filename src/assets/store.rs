use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{BrandpressError, BrandpressResult};

/// Logo file extensions the store recognizes.
const LOGO_EXTENSIONS: [&str; 2] = [".png", ".svg"];
/// Font file extensions the store recognizes.
const FONT_EXTENSIONS: [&str; 2] = [".ttf", ".otf"];

#[derive(Clone, Debug)]
/// Synchronous filesystem store for brand logos and fonts.
///
/// Logos live under `<logos_root>/<brand folder>/<file>`, fonts directly
/// under `<fonts_root>`. Reads are plain blocking filesystem reads; absence
/// of a file is a recoverable per-item failure for callers, never a batch
/// abort. No caching: a file updated on disk is visible to the next request.
pub struct AssetStore {
    logos_root: PathBuf,
    fonts_root: PathBuf,
}

impl AssetStore {
    /// Create a store over the two asset roots.
    pub fn new(logos_root: impl Into<PathBuf>, fonts_root: impl Into<PathBuf>) -> Self {
        Self {
            logos_root: logos_root.into(),
            fonts_root: fonts_root.into(),
        }
    }

    /// Read a logo file from a brand folder.
    pub fn read_logo(&self, folder: &str, filename: &str) -> BrandpressResult<Vec<u8>> {
        let path = self
            .logos_root
            .join(sanitize_component(folder)?)
            .join(sanitize_component(filename)?);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read logo {}/{}", folder, filename))?;
        Ok(bytes)
    }

    /// Read a font file by name.
    pub fn read_font(&self, filename: &str) -> BrandpressResult<Vec<u8>> {
        let path = self.fonts_root.join(sanitize_component(filename)?);
        let bytes = std::fs::read(&path).with_context(|| format!("read font {filename}"))?;
        Ok(bytes)
    }

    /// Brand folders under the logo root, sorted.
    pub fn list_logo_folders(&self) -> BrandpressResult<Vec<String>> {
        let mut folders = Vec::new();
        let entries = std::fs::read_dir(&self.logos_root).context("list logo folders")?;
        for entry in entries {
            let entry = entry.context("list logo folders")?;
            if entry.path().is_dir() {
                folders.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        folders.sort();
        Ok(folders)
    }

    /// Logo files (`.png`, `.svg`) inside a brand folder, sorted.
    pub fn list_logos(&self, folder: &str) -> BrandpressResult<Vec<String>> {
        let dir = self.logos_root.join(sanitize_component(folder)?);
        list_files_with_extensions(&dir, &LOGO_EXTENSIONS)
            .with_context(|| format!("list logos in {folder}"))
            .map_err(BrandpressError::from)
    }

    /// Font files (`.ttf`, `.otf`) under the font root, sorted.
    pub fn list_fonts(&self) -> BrandpressResult<Vec<String>> {
        list_files_with_extensions(&self.fonts_root, &FONT_EXTENSIONS)
            .context("list fonts")
            .map_err(BrandpressError::from)
    }
}

fn list_files_with_extensions(dir: &Path, extensions: &[&str]) -> anyhow::Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let lower = name.to_ascii_lowercase();
        if extensions.iter().any(|ext| lower.ends_with(ext)) {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

/// Reject path components that would escape the store roots.
fn sanitize_component(part: &str) -> BrandpressResult<&str> {
    if part.is_empty() {
        return Err(BrandpressError::asset("asset name must be non-empty"));
    }
    if part.contains('/') || part.contains('\\') || part == ".." {
        return Err(BrandpressError::asset(format!(
            "asset name '{part}' must be a bare file or folder name"
        )));
    }
    Ok(part)
}
