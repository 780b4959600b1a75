//! MIPAV text palettes
//!
//! A MIPAV colormap is a plain text file with one `R G B` triple per line
//! (commas are accepted as separators), exactly 256 non-blank lines.

use lut_compress::{normalize_name, DensePalette, PALETTE_LEN};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{PaletteSource, SourceError, SourceOutcome};
use crate::models::AlphaRule;

/// Parse MIPAV text into `[R, G, B]` rows without range checking.
///
/// Blank lines are skipped; columns beyond the third are ignored.
pub fn parse_rows(text: &str) -> Result<Vec<[i64; 3]>, SourceError> {
    let mut rows = Vec::with_capacity(PALETTE_LEN);
    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let cleaned = line.replace(',', " ");
        let parts: Vec<&str> = cleaned.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(SourceError::Parse {
                line: lineno + 1,
                message: format!("expected 3 values, found {}", parts.len()),
            });
        }
        let mut row = [0i64; 3];
        for (slot, token) in row.iter_mut().zip(&parts) {
            *slot = token.parse().map_err(|_| SourceError::Parse {
                line: lineno + 1,
                message: format!("'{token}' is not an integer"),
            })?;
        }
        rows.push(row);
    }

    if rows.len() != PALETTE_LEN {
        return Err(SourceError::RowCount {
            expected: PALETTE_LEN,
            found: rows.len(),
        });
    }
    Ok(rows)
}

/// Parse MIPAV text into a validated dense palette.
pub fn parse_palette(name: &str, text: &str, alpha: AlphaRule) -> Result<DensePalette, SourceError> {
    let rows: Vec<[i64; 4]> = parse_rows(text)?
        .into_iter()
        .enumerate()
        .map(|(i, [r, g, b])| [r, g, b, i64::from(alpha.value_at(i, None))])
        .collect();
    Ok(DensePalette::from_rows(name, &rows)?)
}

/// A MIPAV `.txt` palette on disk.
#[derive(Debug, Clone)]
pub struct MipavFile {
    path: PathBuf,
    name: String,
}

impl MipavFile {
    /// Name is the file stem with spaces replaced by underscores.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            name: normalize_name(&stem),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All `.txt` files (any case) directly inside `dir`, sorted by file name.
    pub fn discover(dir: &Path) -> io::Result<Vec<MipavFile>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
            })
            .collect();
        paths.sort();
        Ok(paths.into_iter().map(MipavFile::new).collect())
    }
}

impl PaletteSource for MipavFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self, alpha: AlphaRule) -> Result<SourceOutcome, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::trace!(path = %self.path.display(), "Parsing MIPAV palette");
        parse_palette(&self.name, &text, alpha).map(SourceOutcome::Palette)
    }
}
