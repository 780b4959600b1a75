//! Dense 256-entry palette.
//!
//! This is the common shape every colormap source is reduced to before
//! compression: one RGBA entry per index over the fixed domain `0..=255`.
//! The index doubles as the interpolation axis, so there is no separate
//! position coordinate.

use super::error::PaletteError;
use super::rgba::{Channel, Rgba};

/// Number of entries in a dense palette.
pub const PALETTE_LEN: usize = 256;

/// Normalize a colormap name: surrounding whitespace is trimmed and inner
/// spaces become underscores.
///
/// ```
/// assert_eq!(lut_compress::normalize_name(" Cool Warm "), "Cool_Warm");
/// ```
pub fn normalize_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

/// An immutable palette of exactly [`PALETTE_LEN`] RGBA entries.
///
/// # Example
///
/// ```
/// use lut_compress::{DensePalette, Rgba};
///
/// let samples: Vec<Rgba> = (0..=255u8).map(|v| Rgba::new(v, v, v, 255)).collect();
/// let palette = DensePalette::new("gray ramp", samples).unwrap();
///
/// assert_eq!(palette.name(), "gray_ramp");
/// assert_eq!(palette.get(128).r, 128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensePalette {
    name: String,
    samples: Vec<Rgba>,
}

impl DensePalette {
    /// Create a palette from exactly 256 entries.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::WrongLength`] for any other number of entries.
    pub fn new(name: &str, samples: Vec<Rgba>) -> Result<Self, PaletteError> {
        if samples.len() != PALETTE_LEN {
            return Err(PaletteError::WrongLength {
                expected: PALETTE_LEN,
                actual: samples.len(),
            });
        }
        Ok(Self {
            name: normalize_name(name),
            samples,
        })
    }

    /// Create a palette from an integer matrix with one `[R, G, B, A]` row per
    /// index.
    ///
    /// This is the boundary used by callers whose values have not yet been
    /// range-checked (text parsers, foreign matrices).
    ///
    /// # Errors
    ///
    /// - [`PaletteError::WrongLength`] if there are not exactly 256 rows
    /// - [`PaletteError::ChannelOutOfRange`] for the first value outside `0..=255`
    pub fn from_rows(name: &str, rows: &[[i64; 4]]) -> Result<Self, PaletteError> {
        if rows.len() != PALETTE_LEN {
            return Err(PaletteError::WrongLength {
                expected: PALETTE_LEN,
                actual: rows.len(),
            });
        }

        let mut samples = Vec::with_capacity(PALETTE_LEN);
        for (index, row) in rows.iter().enumerate() {
            let mut bytes = [0u8; 4];
            for channel in Channel::ALL {
                let value = row[channel.index()];
                bytes[channel.index()] =
                    u8::try_from(value).map_err(|_| PaletteError::ChannelOutOfRange {
                        index,
                        channel,
                        value,
                    })?;
            }
            samples.push(Rgba::from_array(bytes));
        }

        Self::new(name, samples)
    }

    /// Wrap samples already known to hold exactly [`PALETTE_LEN`] entries.
    pub(crate) fn from_trusted(name: &str, samples: Vec<Rgba>) -> Self {
        debug_assert_eq!(samples.len(), PALETTE_LEN);
        Self {
            name: normalize_name(name),
            samples,
        }
    }

    /// Normalized colormap name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All entries in index order.
    pub fn samples(&self) -> &[Rgba] {
        &self.samples
    }

    /// Entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 256`.
    #[inline]
    pub fn get(&self, index: usize) -> Rgba {
        self.samples[index]
    }

    /// Value of one channel at `index` (panics like [`DensePalette::get`]).
    #[inline]
    pub fn value(&self, index: usize, channel: Channel) -> u8 {
        self.samples[index].channel(channel)
    }

    /// True if every entry equals the first one.
    pub fn is_uniform(&self) -> bool {
        self.samples.windows(2).all(|w| w[0] == w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_rows() -> Vec<[i64; 4]> {
        (0..256).map(|v| [v, v, v, 255]).collect()
    }

    #[test]
    fn test_new_rejects_short_palette() {
        let samples = vec![Rgba::default(); 255];
        let err = DensePalette::new("short", samples).unwrap_err();
        assert_eq!(
            err,
            PaletteError::WrongLength {
                expected: 256,
                actual: 255
            }
        );
    }

    #[test]
    fn test_new_rejects_long_palette() {
        let samples = vec![Rgba::default(); 257];
        assert!(matches!(
            DensePalette::new("long", samples),
            Err(PaletteError::WrongLength { actual: 257, .. })
        ));
    }

    #[test]
    fn test_from_rows_accepts_valid_matrix() {
        let palette = DensePalette::from_rows("gray", &gray_rows()).unwrap();
        assert_eq!(palette.samples().len(), PALETTE_LEN);
        assert_eq!(palette.get(0), Rgba::new(0, 0, 0, 255));
        assert_eq!(palette.get(255), Rgba::new(255, 255, 255, 255));
        assert_eq!(palette.value(42, Channel::Green), 42);
    }

    #[test]
    fn test_from_rows_rejects_out_of_range() {
        let mut rows = gray_rows();
        rows[10][2] = 256;
        let err = DensePalette::from_rows("bad", &rows).unwrap_err();
        assert_eq!(
            err,
            PaletteError::ChannelOutOfRange {
                index: 10,
                channel: Channel::Blue,
                value: 256
            }
        );
    }

    #[test]
    fn test_from_rows_rejects_negative() {
        let mut rows = gray_rows();
        rows[3][3] = -1;
        assert!(matches!(
            DensePalette::from_rows("bad", &rows),
            Err(PaletteError::ChannelOutOfRange {
                index: 3,
                channel: Channel::Alpha,
                value: -1
            })
        ));
    }

    #[test]
    fn test_from_rows_checks_length_first() {
        let rows = vec![[999, 0, 0, 0]; 10];
        assert!(matches!(
            DensePalette::from_rows("bad", &rows),
            Err(PaletteError::WrongLength { actual: 10, .. })
        ));
    }

    #[test]
    fn test_name_is_normalized() {
        let palette = DensePalette::from_rows("  hot metal blue ", &gray_rows()).unwrap();
        assert_eq!(palette.name(), "hot_metal_blue");
    }

    #[test]
    fn test_is_uniform() {
        let flat = DensePalette::new("flat", vec![Rgba::new(1, 2, 3, 4); 256]).unwrap();
        assert!(flat.is_uniform());
        let ramp = DensePalette::from_rows("ramp", &gray_rows()).unwrap();
        assert!(!ramp.is_uniform());
    }
}
