//! Colormap definitions as data.
//!
//! matplotlib's `_cm.py` tables and scientific colour lists are transcribed
//! into small YAML documents, one per colormap, tagged by `style`:
//!
//! ```yaml
//! style: segmented
//! red:   [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]
//! green: [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]
//! blue:  [[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]
//! ```

use serde::Deserialize;

/// One colormap definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum ColormapDefinition {
    /// matplotlib `LinearSegmentedColormap` segment data
    Segmented(SegmentData),
    /// Explicit list of colours
    Listed(ListedColors),
    /// Procedural definition (formula per channel); cannot be sampled here
    Function(FunctionSpec),
}

impl ColormapDefinition {
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    pub fn style(&self) -> &'static str {
        match self {
            ColormapDefinition::Segmented(_) => "segmented",
            ColormapDefinition::Listed(_) => "listed",
            ColormapDefinition::Function(_) => "function",
        }
    }
}

/// `[x, y0, y1]`: at position `x` the channel arrives at `y0` from the left
/// and leaves with `y1` to the right.
pub type Anchor = [f64; 3];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SegmentData {
    pub red: Vec<Anchor>,
    pub green: Vec<Anchor>,
    pub blue: Vec<Anchor>,
    #[serde(default)]
    pub alpha: Option<Vec<Anchor>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListedColors {
    pub colors: Vec<ColorValue>,
    #[serde(default)]
    pub interpolation: ListedInterpolation,
}

/// A colour as written in a definition file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorValue {
    /// `#rgb`, `#rrggbb` or `#rrggbbaa`
    Hex(String),
    /// 3 or 4 components, fractional (all <= 1.0) or 0..255
    Components(Vec<f64>),
}

/// How a short colour list is stretched over 256 entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListedInterpolation {
    /// Evenly spaced stops blended linearly
    #[default]
    Linear,
    /// Each colour owns an equal share of the range (qualitative maps)
    Nearest,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FunctionSpec {
    #[serde(default)]
    pub description: Option<String>,
}
