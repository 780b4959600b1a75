//! Sampling of YAML colormap definitions
//!
//! Segment data follows matplotlib's lookup-table construction exactly, so a
//! transcribed `_cm.py` entry yields the same 256 colours matplotlib would.
//! Colour lists are either blended linearly between evenly spaced stops or
//! looked up nearest-entry like a qualitative `ListedColormap`.

use lut_compress::{normalize_name, DensePalette, Rgba, PALETTE_LEN};

use super::{unit_to_byte, PaletteSource, SourceError, SourceOutcome};
use crate::models::{
    AlphaRule, Anchor, ColorValue, ColormapDefinition, ListedColors, ListedInterpolation,
    SegmentData,
};

const LAST: f64 = (PALETTE_LEN - 1) as f64;

/// A colormap definition document, parsed when loaded.
#[derive(Debug, Clone)]
pub struct DefinitionSource {
    name: String,
    text: String,
}

impl DefinitionSource {
    pub fn new(name: &str, text: impl Into<String>) -> Self {
        Self {
            name: normalize_name(name),
            text: text.into(),
        }
    }
}

impl PaletteSource for DefinitionSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self, alpha: AlphaRule) -> Result<SourceOutcome, SourceError> {
        let definition = ColormapDefinition::from_yaml(&self.text)?;
        tracing::trace!(name = %self.name, style = definition.style(), "Sampling definition");
        sample(&self.name, &definition, alpha)
    }
}

/// Sample any definition style to a dense palette.
pub fn sample(
    name: &str,
    definition: &ColormapDefinition,
    alpha: AlphaRule,
) -> Result<SourceOutcome, SourceError> {
    match definition {
        ColormapDefinition::Segmented(data) => {
            sample_segmented(name, data, alpha).map(SourceOutcome::Palette)
        }
        ColormapDefinition::Listed(list) => {
            sample_listed(name, list, alpha).map(SourceOutcome::Palette)
        }
        ColormapDefinition::Function(function) => {
            let reason = match &function.description {
                Some(d) => format!("function-defined colormap ({d})"),
                None => "function-defined colormap".to_string(),
            };
            Ok(SourceOutcome::Unsupported(reason))
        }
    }
}

/// matplotlib `_create_lookup_table` for N = 256, gamma = 1.
fn segment_lut(channel: &str, anchors: &[Anchor]) -> Result<Vec<f64>, SourceError> {
    let invalid = |msg: &str| SourceError::Definition(format!("{channel}: {msg}"));

    let (first, last) = match (anchors.first(), anchors.last()) {
        (Some(f), Some(l)) if anchors.len() >= 2 => (f, l),
        _ => return Err(invalid("needs at least two anchors")),
    };
    if first[0] != 0.0 {
        return Err(invalid("first anchor must be at x = 0"));
    }
    if last[0] != 1.0 {
        return Err(invalid("last anchor must be at x = 1"));
    }
    if anchors.windows(2).any(|w| w[1][0] < w[0][0]) {
        return Err(invalid("anchor positions must be non-decreasing"));
    }

    let xs: Vec<f64> = anchors.iter().map(|a| a[0] * LAST).collect();
    let mut lut = Vec::with_capacity(PALETTE_LEN);
    lut.push(first[2]);
    for k in 1..PALETTE_LEN - 1 {
        let x = k as f64;
        // First anchor at or right of x; xs[0] = 0 < x <= 255 = xs[last].
        let j = xs.partition_point(|&v| v < x).clamp(1, xs.len() - 1);
        let (x0, x1) = (xs[j - 1], xs[j]);
        let start = anchors[j - 1][2];
        let end = anchors[j][1];
        let distance = if x1 > x0 { (x - x0) / (x1 - x0) } else { 1.0 };
        lut.push(start + distance * (end - start));
    }
    lut.push(last[1]);

    Ok(lut.into_iter().map(|v| v.clamp(0.0, 1.0)).collect())
}

/// Sample matplotlib segment data.
pub fn sample_segmented(
    name: &str,
    data: &SegmentData,
    alpha: AlphaRule,
) -> Result<DensePalette, SourceError> {
    let red = segment_lut("red", &data.red)?;
    let green = segment_lut("green", &data.green)?;
    let blue = segment_lut("blue", &data.blue)?;
    let source_alpha = data
        .alpha
        .as_deref()
        .map(|anchors| segment_lut("alpha", anchors))
        .transpose()?;

    let samples = (0..PALETTE_LEN)
        .map(|i| {
            let a = source_alpha.as_ref().map(|lut| unit_to_byte(lut[i]));
            Rgba::new(
                unit_to_byte(red[i]),
                unit_to_byte(green[i]),
                unit_to_byte(blue[i]),
                alpha.value_at(i, a),
            )
        })
        .collect();
    Ok(DensePalette::new(name, samples)?)
}

/// A colour from a definition, as fractions in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitColor {
    pub rgb: [f64; 3],
    pub alpha: Option<f64>,
}

fn hex_pair(s: &str) -> Option<f64> {
    u8::from_str_radix(s, 16).ok().map(|v| f64::from(v) / 255.0)
}

/// Parse a hex string or component list.
pub fn parse_color(value: &ColorValue) -> Result<UnitColor, SourceError> {
    match value {
        ColorValue::Hex(s) => {
            let invalid = || SourceError::Definition(format!("unrecognized hex color '{s}'"));
            let hex = s.trim().trim_start_matches('#');
            if !hex.is_ascii() {
                return Err(invalid());
            }
            let expanded: String = if hex.len() == 3 {
                hex.chars().flat_map(|c| [c, c]).collect()
            } else {
                hex.to_string()
            };
            if expanded.len() != 6 && expanded.len() != 8 {
                return Err(invalid());
            }
            let channel = |i: usize| hex_pair(&expanded[i..i + 2]).ok_or_else(invalid);
            Ok(UnitColor {
                rgb: [channel(0)?, channel(2)?, channel(4)?],
                alpha: if expanded.len() == 8 {
                    Some(channel(6)?)
                } else {
                    None
                },
            })
        }
        ColorValue::Components(parts) => {
            if parts.len() != 3 && parts.len() != 4 {
                return Err(SourceError::Definition(format!(
                    "color needs 3 or 4 components, found {}",
                    parts.len()
                )));
            }
            let scale = if parts.iter().all(|&v| v <= 1.0 + 1e-8) {
                1.0
            } else {
                255.0
            };
            let unit: Vec<f64> = parts.iter().map(|v| (v / scale).clamp(0.0, 1.0)).collect();
            Ok(UnitColor {
                rgb: [unit[0], unit[1], unit[2]],
                alpha: unit.get(3).copied(),
            })
        }
    }
}

/// Sample an explicit colour list.
pub fn sample_listed(
    name: &str,
    list: &ListedColors,
    alpha: AlphaRule,
) -> Result<DensePalette, SourceError> {
    let colors = list
        .colors
        .iter()
        .map(parse_color)
        .collect::<Result<Vec<_>, _>>()?;
    if colors.is_empty() {
        return Err(SourceError::Definition("color list is empty".to_string()));
    }
    let has_alpha = colors.iter().any(|c| c.alpha.is_some());
    let n = colors.len();

    let samples = (0..PALETTE_LEN)
        .map(|k| {
            let (rgb, a) = match list.interpolation {
                ListedInterpolation::Nearest => {
                    let idx = ((k * n) / (PALETTE_LEN - 1)).min(n - 1);
                    let c = colors[idx];
                    (c.rgb, c.alpha.unwrap_or(1.0))
                }
                ListedInterpolation::Linear if n == 1 => {
                    (colors[0].rgb, colors[0].alpha.unwrap_or(1.0))
                }
                ListedInterpolation::Linear => {
                    let pos = (k * (n - 1)) as f64 / LAST;
                    let j = (pos.floor() as usize).min(n - 2);
                    let f = pos - j as f64;
                    let (c0, c1) = (colors[j], colors[j + 1]);
                    let mix = |a: f64, b: f64| a + (b - a) * f;
                    (
                        [
                            mix(c0.rgb[0], c1.rgb[0]),
                            mix(c0.rgb[1], c1.rgb[1]),
                            mix(c0.rgb[2], c1.rgb[2]),
                        ],
                        mix(c0.alpha.unwrap_or(1.0), c1.alpha.unwrap_or(1.0)),
                    )
                }
            };
            let source_alpha = has_alpha.then(|| unit_to_byte(a));
            Rgba::new(
                unit_to_byte(rgb[0]),
                unit_to_byte(rgb[1]),
                unit_to_byte(rgb[2]),
                alpha.value_at(k, source_alpha),
            )
        })
        .collect();
    Ok(DensePalette::new(name, samples)?)
}
