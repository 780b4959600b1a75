//! Errors raised at the compressor boundary

use thiserror::Error;

use crate::palette::PaletteError;

/// Failure of a compression request. Nothing is produced when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompressError {
    #[error("invalid palette: {0}")]
    InvalidPalette(#[from] PaletteError),

    #[error("invalid tolerance {0}: must be >= 0")]
    InvalidTolerance(i64),
}

/// An externally supplied control-point set breaks the sparse format's invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlPointError {
    #[error("control-point set is empty")]
    Empty,

    #[error("first control point must be at 0, found {0}")]
    MissingStart(u8),

    #[error("last control point must be at 255, found {0}")]
    MissingEnd(u8),

    #[error("positions must be strictly increasing (violated at entry {index})")]
    NotIncreasing { index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_tolerance_message() {
        assert_eq!(
            CompressError::InvalidTolerance(-3).to_string(),
            "invalid tolerance -3: must be >= 0"
        );
    }

    #[test]
    fn test_invalid_palette_from() {
        let err: CompressError = PaletteError::WrongLength {
            expected: 256,
            actual: 255,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid palette: palette must have 256 entries, found 255"
        );
    }

    #[test]
    fn test_control_point_messages() {
        assert_eq!(
            ControlPointError::MissingEnd(200).to_string(),
            "last control point must be at 255, found 200"
        );
        assert_eq!(
            ControlPointError::NotIncreasing { index: 3 }.to_string(),
            "positions must be strictly increasing (violated at entry 3)"
        );
    }
}
