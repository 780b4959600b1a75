//! Asset loading with embedded fallbacks
//!
//! Colormap definitions and the default config ship inside the binary.
//!
//! - If an env var is NOT set: use embedded assets only (no filesystem access)
//! - If an env var IS set: the filesystem wins, embedded assets fill the gaps

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded colormap definitions
#[derive(RustEmbed)]
#[folder = "colormaps/"]
#[include = "*.yaml"]
struct EmbeddedColormaps;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const COLORMAP_EXT: &str = ".yaml";

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Colormaps,
    Config,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with merge behavior and optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External colormap directory (from COLORMAPS_DIR env var)
    colormaps_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// Paths should be `Some` only if the corresponding env var was set.
    /// If `None`, embedded assets are used exclusively.
    pub fn new(colormaps_dir: Option<PathBuf>, config_file: Option<PathBuf>) -> Self {
        Self {
            colormaps_dir,
            config_file,
        }
    }

    /// Build from `COLORMAPS_DIR` and `CONFIG_FILE`
    pub fn from_env() -> Self {
        Self::new(
            std::env::var_os("COLORMAPS_DIR").map(PathBuf::from),
            std::env::var_os("CONFIG_FILE").map(PathBuf::from),
        )
    }

    pub fn colormaps_dir(&self) -> Option<&Path> {
        self.colormaps_dir.as_deref()
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Read a colormap definition by name (without extension)
    ///
    /// If an external path is configured, tries filesystem first, then falls back to embedded.
    pub fn read_colormap(&self, name: &str) -> io::Result<String> {
        let file_name = format!("{name}{COLORMAP_EXT}");

        if let Some(ref dir) = self.colormaps_dir {
            let full_path = dir.join(&file_name);
            if full_path.exists() {
                tracing::trace!(path = %full_path.display(), "Loading colormap from filesystem");
                return fs::read_to_string(&full_path);
            }
        }

        let data = EmbeddedColormaps::get(&file_name)
            .map(|f| {
                tracing::trace!(colormap = %name, "Loading colormap from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("Colormap not found: {name}"),
                )
            })?;
        utf8(data)
    }

    /// List all available colormaps (merged view of embedded + external), sorted
    pub fn list_colormaps(&self) -> Vec<String> {
        let mut names: BTreeSet<String> = EmbeddedColormaps::iter()
            .filter_map(|f| f.strip_suffix(COLORMAP_EXT).map(str::to_string))
            .collect();

        if let Some(ref dir) = self.colormaps_dir {
            if let Ok(entries) = fs::read_dir(dir) {
                for entry in entries.flatten() {
                    if let Some(name) = entry.file_name().to_str() {
                        if let Some(stem) = name.strip_suffix(COLORMAP_EXT) {
                            names.insert(stem.to_string());
                        }
                    }
                }
            }
        }

        names.into_iter().collect()
    }

    /// Read the config file
    ///
    /// If an external path is configured and exists, uses that.
    /// Otherwise falls back to embedded config.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found")
            })
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> io::Result<String> {
        utf8(self.read_config()?)
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths (or defaults if not set).
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();

        for category in categories {
            match category {
                AssetCategory::Colormaps => {
                    let dir = self
                        .colormaps_dir
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./colormaps"));
                    fs::create_dir_all(&dir)?;

                    for file in EmbeddedColormaps::iter() {
                        let path = dir.join(file.as_ref());
                        if !force && path.exists() {
                            report.skipped.push(path.display().to_string());
                            continue;
                        }
                        if let Some(data) = EmbeddedColormaps::get(&file) {
                            fs::write(&path, &*data.data)?;
                            report.written.push(path.display().to_string());
                        }
                    }
                }
                AssetCategory::Config => {
                    let path = self
                        .config_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./config.yaml"));

                    if !force && path.exists() {
                        report.skipped.push(path.display().to_string());
                        continue;
                    }
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    if let Some(data) = EmbeddedConfig::get("config.yaml") {
                        fs::write(&path, &*data.data)?;
                        report.written.push(path.display().to_string());
                    }
                }
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        match category {
            AssetCategory::Colormaps => {
                let mut files: Vec<String> =
                    EmbeddedColormaps::iter().map(|s| s.to_string()).collect();
                files.sort();
                files
            }
            AssetCategory::Config => vec!["config.yaml".to_string()],
        }
    }
}

fn utf8(bytes: Cow<'static, [u8]>) -> io::Result<String> {
    String::from_utf8(bytes.into_owned()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_embedded_colormaps_listed() {
        let loader = AssetLoader::default();
        let names = loader.list_colormaps();
        assert!(names.contains(&"hot".to_string()));
        assert!(names.contains(&"gnuplot".to_string()));
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_read_embedded_colormap() {
        let loader = AssetLoader::default();
        let text = loader.read_colormap("gray").unwrap();
        assert!(text.contains("segmented"));
    }

    #[test]
    fn test_missing_colormap_is_not_found() {
        let loader = AssetLoader::default();
        let err = loader.read_colormap("no_such_map").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_external_colormap_overrides_and_merges() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("gray.yaml"), "style: function\n").unwrap();
        fs::write(dir.path().join("custom.yaml"), "style: function\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let loader = AssetLoader::new(Some(dir.path().to_path_buf()), None);
        assert_eq!(loader.read_colormap("gray").unwrap(), "style: function\n");

        let names = loader.list_colormaps();
        assert!(names.contains(&"custom".to_string()));
        assert!(names.contains(&"hot".to_string()));
        assert!(!names.iter().any(|n| n == "notes"));
    }

    #[test]
    fn test_config_falls_back_to_embedded() {
        let dir = TempDir::new().unwrap();
        let loader = AssetLoader::new(None, Some(dir.path().join("missing.yaml")));
        let text = loader.read_config_string().unwrap();
        assert!(text.contains("tolerance"));
    }

    #[test]
    fn test_init_writes_then_skips() {
        let dir = TempDir::new().unwrap();
        let loader = AssetLoader::new(
            Some(dir.path().join("colormaps")),
            Some(dir.path().join("config.yaml")),
        );

        let first = loader
            .init(&[AssetCategory::Colormaps, AssetCategory::Config], false)
            .unwrap();
        assert!(first.skipped.is_empty());
        assert_eq!(
            first.written.len(),
            AssetLoader::list_embedded(AssetCategory::Colormaps).len() + 1
        );
        assert!(dir.path().join("colormaps/hot.yaml").exists());

        let second = loader.init(&[AssetCategory::Config], false).unwrap();
        assert!(second.written.is_empty());
        assert_eq!(second.skipped.len(), 1);

        let forced = loader.init(&[AssetCategory::Config], true).unwrap();
        assert_eq!(forced.written.len(), 1);
    }
}
