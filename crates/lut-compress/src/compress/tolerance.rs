//! Per-channel reconstruction error bound

use std::fmt;

use super::error::CompressError;
use crate::palette::Channel;

/// Default bound, matching the MIPAV converters.
pub const DEFAULT_TOLERANCE: u8 = 2;

/// Maximum allowed absolute difference, per channel, between an original
/// palette value and its linearly interpolated reconstruction.
///
/// A channel value can never differ by more than 255, so larger requests are
/// clamped to 255.
///
/// ```
/// use lut_compress::{Channel, Tolerance};
///
/// let tol = Tolerance::new(3).unwrap();
/// assert_eq!(tol.get(Channel::Alpha), 3);
/// assert!(Tolerance::new(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tolerance([u8; 4]);

impl Tolerance {
    /// Same bound for every channel.
    pub const fn uniform(value: u8) -> Self {
        Self([value; 4])
    }

    /// Separate bounds in R, G, B, A order.
    pub const fn per_channel(values: [u8; 4]) -> Self {
        Self(values)
    }

    /// Uniform bound from a signed integer.
    ///
    /// # Errors
    ///
    /// Returns [`CompressError::InvalidTolerance`] if `value` is negative.
    pub fn new(value: i64) -> Result<Self, CompressError> {
        if value < 0 {
            return Err(CompressError::InvalidTolerance(value));
        }
        Ok(Self::uniform(value.min(255) as u8))
    }

    #[inline]
    pub fn get(self, channel: Channel) -> u8 {
        self.0[channel.index()]
    }

    pub fn as_array(self) -> [u8; 4] {
        self.0
    }

    /// Returns the single bound if all channels share it.
    pub fn as_uniform(self) -> Option<u8> {
        let first = self.0[0];
        self.0.iter().all(|&v| v == first).then_some(first)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::uniform(DEFAULT_TOLERANCE)
    }
}

impl TryFrom<i64> for Tolerance {
    type Error = CompressError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_uniform() {
            Some(v) => write!(f, "{v}"),
            None => {
                let [r, g, b, a] = self.0;
                write!(f, "r={r} g={g} b={b} a={a}")
            }
        }
    }
}
