//! Batch conversion
//!
//! Every source is loaded, compressed and written independently, so a batch
//! fans out over rayon's pool and the outcomes are folded back in input
//! order. A failing colormap becomes a skip in the report; it never stops
//! the others.

use lut_compress::{compress, Tolerance};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use super::report::{ConversionOutcome, ConversionReport};
use crate::error::ConvertError;
use crate::models::{AlphaRule, AppConfig};
use crate::output::NiivueColormap;
use crate::sources::{PaletteSource, SourceOutcome};

/// Everything a conversion needs besides the source itself
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSettings {
    pub tolerance: Tolerance,
    pub alpha: AlphaRule,
    pub pretty: bool,
    pub output_dir: PathBuf,
}

impl ConversionSettings {
    /// Settings taken from the loaded configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, ConvertError> {
        Self::from_config_with_tolerance(config, None)
    }

    /// Settings from the configuration, with `tolerance` replacing the
    /// configured bound when given. The configured bound is not validated
    /// in that case.
    pub fn from_config_with_tolerance(
        config: &AppConfig,
        tolerance: Option<Tolerance>,
    ) -> Result<Self, ConvertError> {
        let tolerance = match tolerance {
            Some(tolerance) => tolerance,
            None => config.tolerance.resolve()?,
        };
        Ok(Self {
            tolerance,
            alpha: config.alpha,
            pretty: config.pretty,
            output_dir: config.output_dir.clone(),
        })
    }
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            alpha: AlphaRule::default(),
            pretty: false,
            output_dir: PathBuf::from("."),
        }
    }
}

pub struct Converter {
    settings: ConversionSettings,
}

impl Converter {
    pub fn new(settings: ConversionSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Output file for a colormap name
    pub fn output_path(&self, name: &str) -> PathBuf {
        json_path(&self.settings.output_dir, name)
    }

    /// Convert one source; failures come back as [`ConversionOutcome::Skipped`].
    pub fn convert_one(&self, source: &dyn PaletteSource) -> ConversionOutcome {
        let name = source.name().to_string();
        match self.try_convert(source) {
            Ok(outcome) => {
                if let ConversionOutcome::Converted { nodes, .. } = &outcome {
                    tracing::info!(colormap = %name, nodes, "Converted");
                }
                outcome
            }
            Err(e) => {
                tracing::warn!(colormap = %name, error = %e, "Skipping");
                ConversionOutcome::Skipped {
                    name,
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_convert(&self, source: &dyn PaletteSource) -> Result<ConversionOutcome, ConvertError> {
        let palette = match source.load(self.settings.alpha)? {
            SourceOutcome::Palette(palette) => palette,
            SourceOutcome::Unsupported(reason) => return Err(ConvertError::Unsupported(reason)),
        };

        let set = compress(&palette, self.settings.tolerance);
        let max_error = set.max_error(&palette);
        tracing::debug!(
            colormap = %palette.name(),
            tolerance = %self.settings.tolerance,
            sampled = palette.samples().len(),
            nodes = set.len(),
            ?max_error,
            "Compressed palette"
        );

        let path = self.output_path(palette.name());
        NiivueColormap::from(&set).write(&path, self.settings.pretty)?;

        Ok(ConversionOutcome::Converted {
            name: palette.name().to_string(),
            nodes: set.len(),
            path,
            max_error,
        })
    }

    /// Convert every source in parallel and report in input order.
    pub fn convert_all(&self, sources: &[Box<dyn PaletteSource>]) -> ConversionReport {
        let outcomes: Vec<ConversionOutcome> = sources
            .par_iter()
            .map(|source| self.convert_one(source.as_ref()))
            .collect();

        outcomes
            .into_iter()
            .fold(ConversionReport::new(), |mut report, outcome| {
                report.record(outcome);
                report
            })
    }
}

pub(crate) fn json_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.json"))
}
