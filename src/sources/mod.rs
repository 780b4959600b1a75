//! Source adapters
//!
//! Each adapter turns one upstream colormap format into a [`DensePalette`].
//! Adapters that meet a definition they cannot sample faithfully return
//! [`SourceOutcome::Unsupported`] instead of inventing data.

pub mod catalog;
pub mod definition;
pub mod mipav;

pub use catalog::CatalogSource;
pub use definition::DefinitionSource;
pub use mipav::MipavFile;

use lut_compress::{DensePalette, PaletteError};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::AlphaRule;

/// Result of loading a source that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceOutcome {
    Palette(DensePalette),
    /// The definition style cannot be expressed as 256 samples
    Unsupported(String),
}

/// Anything that can produce a dense palette.
pub trait PaletteSource: Send + Sync {
    /// Normalized colormap name
    fn name(&self) -> &str;

    /// Produce the palette, filling alpha according to `alpha`
    fn load(&self, alpha: AlphaRule) -> Result<SourceOutcome, SourceError>;
}

/// Error from reading or interpreting a colormap source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    #[error("Invalid definition: {0}")]
    Definition(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),
}

/// Convert a fractional channel value to a byte, rounding and clipping.
pub(crate) fn unit_to_byte(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
