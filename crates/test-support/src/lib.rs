#![deny(unsafe_code)]

//! crates/test-support/src/lib.rs
//!
//! Helpers shared by the integration tests of the workspace crates.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tempfile::TempDir;

/// Cloneable in-memory writer.
///
/// Every clone appends to the same buffer, so a test can hand one clone to a
/// logger as its stderr channel and inspect the bytes through another.
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Returns a copy of the bytes written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.lock().clone()
    }

    /// Returns the bytes written so far as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8(self.contents()).expect("captured output is UTF-8")
    }

    /// Returns the captured text split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_owned).collect()
    }

    /// Reports whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Scratch directory removed when dropped.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Creates a fresh scratch directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create scratch directory"),
        }
    }

    /// Root of the scratch directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of `name` inside the scratch directory.
    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

impl Default for ScratchDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads `path` and returns its lines; a missing file yields no lines.
pub fn read_lines(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(text) => text.lines().map(str::to_owned).collect(),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(error) => panic!("failed to read {}: {error}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_buffer_clones_share_storage() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        writer.write_all(b"one\ntwo\n").unwrap();

        assert_eq!(buffer.lines(), vec!["one", "two"]);
        assert!(!buffer.is_empty());
    }

    #[test]
    fn read_lines_of_missing_file_is_empty() {
        let scratch = ScratchDir::new();
        assert!(read_lines(&scratch.join("absent.log")).is_empty());
    }

    #[test]
    fn scratch_entries_live_under_root() {
        let scratch = ScratchDir::new();
        let entry = scratch.join("app.log");

        assert!(scratch.path().is_dir());
        assert_eq!(entry.parent(), Some(scratch.path()));
    }
}
