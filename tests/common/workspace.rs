//! Scratch directories laid out like a real conversion run.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures;

/// A temporary tree with `src/` for inputs and `out/` for results.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(dir.path().join("src")).expect("Failed to create src dir");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn src(&self) -> PathBuf {
        self.dir.path().join("src")
    }

    pub fn out(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    /// Write `text` to `src/<file_name>`
    pub fn add_source(&self, file_name: &str, text: &str) -> PathBuf {
        let path = self.src().join(file_name);
        fs::write(&path, text).expect("Failed to write source file");
        path
    }

    /// Write rows as a MIPAV palette `src/<file_name>`
    pub fn add_palette(&self, file_name: &str, rows: &[[u8; 3]]) -> PathBuf {
        self.add_source(file_name, &fixtures::mipav_text(rows))
    }

    /// Sorted file names in `out/`
    pub fn outputs(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.out())
            .map(|entries| {
                entries
                    .flatten()
                    .filter_map(|e| e.file_name().to_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}
