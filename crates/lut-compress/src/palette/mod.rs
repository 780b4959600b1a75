//! Palette types
//!
//! This module provides the dense palette the compressor consumes, its
//! entry type, and validation errors.

mod dense;
mod error;
mod rgba;

pub use dense::{normalize_name, DensePalette, PALETTE_LEN};
pub use error::PaletteError;
pub use rgba::{Channel, Rgba};
