// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed sandbox so each integration test can
// write configuration documents and fixture files without repeating
// filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use linkset::config::Config;

/// An isolated sandbox backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped (via the underlying
/// [`tempfile::TempDir`]).
pub struct TestSandbox {
    /// Temporary directory holding configuration documents and fixtures.
    pub root: tempfile::TempDir,
}

impl TestSandbox {
    /// Create a new empty sandbox.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path to the sandbox root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Write `content` under `name` (relative to the sandbox root) and return
    /// the absolute path. Parent directories are created as needed.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write file");
        path
    }

    /// Load the documents at `paths` into a fresh [`Config`] and run the
    /// variable resolution pass.
    pub fn load_resolved(&self, paths: &[PathBuf]) -> Config {
        let mut config = Config::new();
        for path in paths {
            config.load(path).expect("load document");
        }
        config.resolve_variables();
        config
    }
}
