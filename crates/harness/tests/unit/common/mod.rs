//! Common fixtures for unit tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Writes `text` as a dump file in a fresh directory.
///
/// The directory is returned so it outlives the path.
pub fn dump_file(text: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("case.dump");
    fs::write(&path, text).expect("write dump");
    (dir, path)
}
