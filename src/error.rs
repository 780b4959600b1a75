use lut_compress::CompressError;
use thiserror::Error;

use crate::output::SinkError;
use crate::sources::SourceError;

/// Why a single colormap could not be converted.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Compression error: {0}")]
    Compress(#[from] CompressError),

    #[error("Output error: {0}")]
    Sink(#[from] SinkError),

    #[error("Unsupported colormap: {0}")]
    Unsupported(String),
}
