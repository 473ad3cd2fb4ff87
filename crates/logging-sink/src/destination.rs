//! crates/logging-sink/src/destination.rs
//! Lazily opened append-only log file with reopen-on-change semantics.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::mem;
use std::path::{Path, PathBuf};

use crate::error::{SinkError, SinkResult};

/// Where a line ended up after [`Destination::append`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Route {
    /// The line was appended to the configured log file.
    File,
    /// No log file is configured; the caller writes to stderr.
    Stderr,
}

/// Handle state of the log file.
///
/// `Open` always records the path the handle was opened against, so a write
/// can tell whether the handle still matches the configured target.
#[derive(Debug, Default)]
enum FileState {
    #[default]
    Closed,
    Open(OpenFile),
}

impl FileState {
    fn take(&mut self) -> Self {
        mem::take(self)
    }
}

#[derive(Debug)]
struct OpenFile {
    path: PathBuf,
    file: File,
}

impl OpenFile {
    fn open(path: &Path) -> SinkResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    fn append(&mut self, record: &[u8]) -> io::Result<()> {
        self.file.write_all(record)
    }
}

/// Configured log file target together with its open handle.
///
/// All methods require exclusive access; the owning logger keeps the
/// destination behind its mutex so the target, the pending flag and the
/// handle change together.
#[derive(Debug, Default)]
pub(crate) struct Destination {
    target: Option<PathBuf>,
    pending: bool,
    state: FileState,
}

impl Destination {
    /// Records a new target. Empty paths mean "write to stderr".
    ///
    /// The handle is not touched here; the next [`append`](Self::append)
    /// closes the stale handle and opens the new path. Re-setting the current
    /// target is a no-op.
    pub(crate) fn set_target(&mut self, path: Option<PathBuf>) {
        let path = path.filter(|path| !path.as_os_str().is_empty());
        if path == self.target {
            return;
        }
        self.target = path;
        self.pending = true;
    }

    pub(crate) fn target(&self) -> Option<&Path> {
        self.target.as_deref()
    }

    /// Path of the currently open handle, if any.
    pub(crate) fn open_path(&self) -> Option<&Path> {
        match &self.state {
            FileState::Open(open) => Some(&open.path),
            FileState::Closed => None,
        }
    }

    /// Appends `record` to the target file, opening or reopening it first
    /// when needed.
    ///
    /// A failed open leaves the destination closed and a failed write drops
    /// the handle, so the next call starts from a fresh open either way.
    pub(crate) fn append(&mut self, record: &[u8]) -> SinkResult<Route> {
        let Some(target) = self.target.as_deref() else {
            self.pending = false;
            self.state = FileState::Closed;
            return Ok(Route::Stderr);
        };

        let mut open = match self.state.take() {
            FileState::Open(open) if !self.pending && open.path == target => open,
            stale => {
                drop(stale);
                self.pending = false;
                OpenFile::open(target)?
            }
        };

        match open.append(record) {
            Ok(()) => {
                self.state = FileState::Open(open);
                Ok(Route::File)
            }
            Err(source) => Err(SinkError::Write {
                path: open.path,
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn without_target_routes_to_stderr() {
        let mut destination = Destination::default();
        assert_eq!(destination.append(b"line\n").unwrap(), Route::Stderr);
        assert!(destination.open_path().is_none());
    }

    #[test]
    fn empty_path_is_no_target() {
        let mut destination = Destination::default();
        destination.set_target(Some(PathBuf::new()));
        assert!(destination.target().is_none());
        assert_eq!(destination.append(b"line\n").unwrap(), Route::Stderr);
    }

    #[test]
    fn first_append_opens_lazily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lazy.log");
        let mut destination = Destination::default();
        destination.set_target(Some(path.clone()));

        assert!(destination.open_path().is_none());
        assert!(!path.exists());

        assert_eq!(destination.append(b"one\n").unwrap(), Route::File);
        assert_eq!(destination.open_path(), Some(path.as_path()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\n");
    }

    #[test]
    fn target_change_reopens_on_next_append() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.log");
        let second = dir.path().join("second.log");
        let mut destination = Destination::default();

        destination.set_target(Some(first.clone()));
        destination.append(b"a\n").unwrap();
        destination.set_target(Some(second.clone()));

        // Still holding the old handle until the next write.
        assert_eq!(destination.open_path(), Some(first.as_path()));

        destination.append(b"b\n").unwrap();
        assert_eq!(destination.open_path(), Some(second.as_path()));
        assert_eq!(fs::read_to_string(&first).unwrap(), "a\n");
        assert_eq!(fs::read_to_string(&second).unwrap(), "b\n");
    }

    #[test]
    fn clearing_target_closes_handle_on_next_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("closed.log");
        let mut destination = Destination::default();

        destination.set_target(Some(path));
        destination.append(b"a\n").unwrap();
        destination.set_target(None);

        assert_eq!(destination.append(b"b\n").unwrap(), Route::Stderr);
        assert!(destination.open_path().is_none());
    }

    #[test]
    fn open_failure_leaves_destination_closed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");
        let mut destination = Destination::default();
        destination.set_target(Some(path.clone()));

        let error = destination.append(b"lost\n").unwrap_err();
        assert!(matches!(error, SinkError::Open { path: ref p, .. } if *p == path));
        assert!(destination.open_path().is_none());

        fs::create_dir(dir.path().join("missing")).unwrap();
        assert_eq!(destination.append(b"kept\n").unwrap(), Route::File);
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept\n");
    }

    #[test]
    fn resetting_same_target_keeps_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("same.log");
        let mut destination = Destination::default();

        destination.set_target(Some(path.clone()));
        destination.append(b"a\n").unwrap();
        destination.set_target(Some(path.clone()));

        assert!(!destination.pending);
        destination.append(b"b\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }
}
