//! niivue-lut - dense colour lookup tables to NiiVue colormaps
//!
//! Sources (MIPAV text palettes, bundled YAML definitions) are sampled to
//! 256-entry palettes, compressed to control points by `lut_compress`, and
//! written as NiiVue JSON. This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod output;
pub mod services;
pub mod sources;
