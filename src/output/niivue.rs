//! NiiVue colormap JSON
//!
//! NiiVue reads a colormap as five parallel arrays: `R`, `G`, `B`, `A` hold
//! the channel values of each control point and `I` its palette index.

use lut_compress::{Channel, ControlPoint, ControlPointSet, Rgba};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::SinkError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NiivueColormap {
    #[serde(rename = "R")]
    pub r: Vec<u8>,
    #[serde(rename = "G")]
    pub g: Vec<u8>,
    #[serde(rename = "B")]
    pub b: Vec<u8>,
    #[serde(rename = "A")]
    pub a: Vec<u8>,
    #[serde(rename = "I")]
    pub i: Vec<u8>,
}

impl From<&ControlPointSet> for NiivueColormap {
    fn from(set: &ControlPointSet) -> Self {
        Self {
            r: set.channel(Channel::Red),
            g: set.channel(Channel::Green),
            b: set.channel(Channel::Blue),
            a: set.channel(Channel::Alpha),
            i: set.positions(),
        }
    }
}

impl TryFrom<NiivueColormap> for ControlPointSet {
    type Error = SinkError;

    fn try_from(map: NiivueColormap) -> Result<Self, Self::Error> {
        let n = map.i.len();
        let lengths = [map.r.len(), map.g.len(), map.b.len(), map.a.len()];
        if lengths.iter().any(|&len| len != n) {
            return Err(SinkError::LengthMismatch {
                positions: n,
                lengths,
            });
        }
        let points = (0..n)
            .map(|k| ControlPoint::new(map.i[k], Rgba::new(map.r[k], map.g[k], map.b[k], map.a[k])))
            .collect();
        Ok(ControlPointSet::from_points(points)?)
    }
}

impl NiivueColormap {
    /// Serialize compactly, or indented when `pretty`; always newline-terminated.
    pub fn to_json(&self, pretty: bool) -> Result<String, SinkError> {
        let mut json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(text: &str) -> Result<Self, SinkError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a colormap file from disk.
    pub fn read(path: &Path) -> Result<Self, SinkError> {
        let text = fs::read_to_string(path).map_err(|source| SinkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Write to `path`, creating the parent directory if needed.
    pub fn write(&self, path: &Path, pretty: bool) -> Result<(), SinkError> {
        let io_err = |source| SinkError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_json(pretty)?).map_err(io_err)
    }

    pub fn len(&self) -> usize {
        self.i.len()
    }

    pub fn is_empty(&self) -> bool {
        self.i.is_empty()
    }
}
