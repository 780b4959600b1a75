use lut_compress::{ControlPointSet, DensePalette, Tolerance};
use std::path::Path;

use crate::error::ConvertError;
use crate::output::NiivueColormap;

/// Result of validating a NiiVue colormap file.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub nodes: usize,
    /// Present when compared against a reference palette
    pub max_error: Option<[f64; 4]>,
    pub within_tolerance: Option<bool>,
}

impl CheckReport {
    /// False only when a reference comparison failed.
    pub fn passed(&self) -> bool {
        self.within_tolerance.unwrap_or(true)
    }
}

/// Validate `path` and optionally compare it against `reference`.
pub fn check_file(
    path: &Path,
    reference: Option<&DensePalette>,
    tolerance: Tolerance,
) -> Result<CheckReport, ConvertError> {
    let map = NiivueColormap::read(path)?;
    let set = ControlPointSet::try_from(map).map_err(ConvertError::Sink)?;
    Ok(check_set(&set, reference, tolerance))
}

pub fn check_set(
    set: &ControlPointSet,
    reference: Option<&DensePalette>,
    tolerance: Tolerance,
) -> CheckReport {
    CheckReport {
        nodes: set.len(),
        max_error: reference.map(|p| set.max_error(p)),
        within_tolerance: reference.map(|p| set.satisfies(p, tolerance)),
    }
}
