//! Shared utilities for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `contents` to `file` inside `dir` and return its path.
#[allow(dead_code)]
pub fn write_file(dir: &TempDir, file: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(file);
    fs::write(&path, contents).unwrap();
    path
}
