//! lut-compress: sparse control points for dense colour palettes
//!
//! Scientific colormaps are usually distributed as dense tables of 256 RGBA
//! samples. NiiVue describes a colormap instead as a short list of intensity
//! positions with an RGBA value at each, interpolating linearly in between.
//! This crate converts the first form into the second while bounding the
//! reconstruction error on every channel.
//!
//! # Quick Start
//!
//! ```
//! use lut_compress::{compress, DensePalette, Rgba, Tolerance};
//!
//! // Black to red, then red to yellow.
//! let samples: Vec<Rgba> = (0..256usize)
//!     .map(|i| {
//!         if i < 128 {
//!             Rgba::new((i * 2) as u8, 0, 0, 255)
//!         } else {
//!             Rgba::new(255, ((i - 128) * 2) as u8, 0, 255)
//!         }
//!     })
//!     .collect();
//! let palette = DensePalette::new("black red yellow", samples).unwrap();
//!
//! let set = compress(&palette, Tolerance::default());
//! assert_eq!(set.positions().first(), Some(&0));
//! assert_eq!(set.positions().last(), Some(&255));
//! assert!(set.satisfies(&palette, Tolerance::default()));
//! ```
//!
//! # Guarantees
//!
//! For every index `i` and channel `c`, the value interpolated from the
//! returned [`ControlPointSet`] differs from the palette by at most the
//! channel's tolerance. Positions are strictly increasing, always include 0
//! and 255, and carry the palette's own values, so the endpoints and every
//! retained node are reproduced exactly.
//!
//! Compression is a pure function: no I/O, no shared state. Batches may call
//! it from as many threads as they like.

pub mod compress;
pub mod palette;


pub use compress::{
    compress, compress_rows, CompressError, ControlPoint, ControlPointError, ControlPointSet,
    Tolerance, DEFAULT_TOLERANCE,
};
pub use palette::{normalize_name, Channel, DensePalette, PaletteError, Rgba, PALETTE_LEN};
