use std::fs;
use std::path::Path;

use super::SinkError;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Write `dir/manifest.json` listing every other `*.json` in `dir`, sorted.
///
/// Returns the listed file names.
pub fn write_manifest(dir: &Path) -> Result<Vec<String>, SinkError> {
    if !dir.is_dir() {
        return Err(SinkError::NotADirectory(dir.to_path_buf()));
    }
    let io_err = |source| SinkError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries: Vec<String> = fs::read_dir(dir)
        .map_err(io_err)?
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.ends_with(".json") && name != MANIFEST_FILE)
        .collect();
    entries.sort();

    let mut json = serde_json::to_string_pretty(&entries)?;
    json.push('\n');
    let path = dir.join(MANIFEST_FILE);
    fs::write(&path, json).map_err(|source| SinkError::Io { path, source })?;

    tracing::debug!(dir = %dir.display(), count = entries.len(), "Wrote manifest");
    Ok(entries)
}
