//! Output in NiiVue's colormap format

pub mod manifest;
pub mod niivue;

pub use manifest::{write_manifest, MANIFEST_FILE};
pub use niivue::NiivueColormap;

use lut_compress::ControlPointError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Array lengths differ: I has {positions}, R/G/B/A have {lengths:?}")]
    LengthMismatch { positions: usize, lengths: [usize; 4] },

    #[error("Invalid control points: {0}")]
    ControlPoints(#[from] ControlPointError),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}
