//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test fixture holding a scratch directory for source and destination files.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture with a fresh scratch directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Path of a file inside the fixture.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a source file and return its path.
    pub fn write_source(&self, name: &str, content: &[u8]) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write source file");
        path
    }

    /// Assert that `path` holds exactly `expected`.
    pub fn assert_file_bytes(&self, path: &Path, expected: &[u8]) {
        assert!(path.exists(), "File does not exist: {:?}", path);
        let actual = fs::read(path).expect("Failed to read file");
        assert_eq!(actual.len(), expected.len(), "File length mismatch");
        assert!(actual == expected, "File content mismatch");
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic, non-repeating-looking test content.
pub fn sample_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}
