use crate::assets::AssetLoader;
use lut_compress::{CompressError, Tolerance, DEFAULT_TOLERANCE};
use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Maximum per-channel reconstruction error
    #[serde(default)]
    pub tolerance: ToleranceConfig,

    /// How the alpha channel is filled in
    #[serde(default)]
    pub alpha: AlphaRule,

    /// Write indented JSON instead of compact single-line arrays
    #[serde(default)]
    pub pretty: bool,

    /// Where converted colormaps are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Colormaps converted when no name is given (empty: all available)
    #[serde(default)]
    pub colormaps: Vec<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_channel_tolerance() -> u8 {
    DEFAULT_TOLERANCE
}

/// Tolerance as written in config: a single number or one per channel.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum ToleranceConfig {
    Uniform(i64),
    PerChannel {
        #[serde(default = "default_channel_tolerance")]
        r: u8,
        #[serde(default = "default_channel_tolerance")]
        g: u8,
        #[serde(default = "default_channel_tolerance")]
        b: u8,
        #[serde(default = "default_channel_tolerance")]
        a: u8,
    },
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        ToleranceConfig::Uniform(i64::from(DEFAULT_TOLERANCE))
    }
}

impl ToleranceConfig {
    /// Validate into a compressor tolerance
    pub fn resolve(self) -> Result<Tolerance, CompressError> {
        match self {
            ToleranceConfig::Uniform(v) => Tolerance::new(v),
            ToleranceConfig::PerChannel { r, g, b, a } => Ok(Tolerance::per_channel([r, g, b, a])),
        }
    }
}

/// Rule for the alpha channel of converted palettes.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlphaRule {
    /// alpha = index / 2, rounded half to even (NiiVue's convention)
    #[default]
    Ramp,
    /// alpha = 255 everywhere
    Opaque,
    /// Use the source's alpha when it has one, otherwise ramp
    Source,
}

impl AlphaRule {
    /// Alpha for palette `index`, given the source's own alpha (if any)
    pub fn value_at(self, index: usize, source: Option<u8>) -> u8 {
        match (self, source) {
            (AlphaRule::Opaque, _) => 255,
            (AlphaRule::Source, Some(a)) => a,
            (AlphaRule::Ramp, _) | (AlphaRule::Source, None) => ramp_alpha(index),
        }
    }
}

/// `index / 2` rounded half to even, so odd indices alternate up and down.
fn ramp_alpha(index: usize) -> u8 {
    let half = index / 2;
    let rounded = if index % 2 == 1 && half % 2 == 1 {
        half + 1
    } else {
        half
    };
    rounded.min(255) as u8
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::debug!(
                        tolerance = ?config.tolerance,
                        alpha = ?config.alpha,
                        colormaps = config.colormaps.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tolerance: ToleranceConfig::default(),
            alpha: AlphaRule::default(),
            pretty: false,
            output_dir: default_output_dir(),
            colormaps: Vec::new(),
        }
    }
}
