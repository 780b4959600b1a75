//! Error types for palette validation
//!
//! A dense palette is rejected before compression starts if it does not
//! have exactly 256 entries or if any channel value falls outside `0..=255`.

use thiserror::Error;

use super::rgba::Channel;

/// The input is not a valid dense palette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// Palette does not have the required number of entries
    #[error("palette must have {expected} entries, found {actual}")]
    WrongLength {
        /// Required number of entries
        expected: usize,
        /// Number of entries supplied
        actual: usize,
    },

    /// A channel value lies outside `0..=255`
    #[error("{channel} value {value} at index {index} is outside 0..=255")]
    ChannelOutOfRange {
        /// Palette index of the offending entry
        index: usize,
        /// Channel holding the bad value
        channel: Channel,
        /// The value as supplied
        value: i64,
    },
}
