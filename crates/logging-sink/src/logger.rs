//! crates/logging-sink/src/logger.rs
//! The shared line sink and its runtime configuration.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::destination::{Destination, Route};
use crate::error::{SinkError, SinkResult};
use crate::format::Format;
use crate::severity::Severity;

/// State guarded by the logger's mutex.
struct SinkState {
    destination: Destination,
    stderr: Box<dyn Write + Send>,
}

impl SinkState {
    fn deliver(&mut self, line: &str) -> SinkResult<()> {
        let mut record = Vec::with_capacity(line.len() + 1);
        record.extend_from_slice(line.as_bytes());
        record.push(b'\n');

        match self.destination.append(&record)? {
            Route::File => Ok(()),
            Route::Stderr => self.stderr.write_all(&record).map_err(SinkError::Stderr),
        }
    }

    fn report(&mut self, error: &SinkError) {
        // Nothing is left to report a broken stderr to.
        if !matches!(error, SinkError::Stderr(_)) {
            let _ = writeln!(self.stderr, "{error}");
        }
    }
}

/// Process-wide line sink.
///
/// A `Logger` owns the output destination (its stderr channel or an
/// append-only file), the active header [`Format`], one enable flag per
/// [`Severity`] and a verbosity level. Every write goes through
/// [`log`](Self::log), which holds the internal mutex for exactly one line, so
/// concurrent writers never interleave and the file handle always matches the
/// configured path when a line is appended.
///
/// The enable flags and the verbosity level are advisory: call sites consult
/// them before building a message, the sink itself never filters.
///
/// # Examples
///
/// ```
/// use logging_sink::{Format, Logger, Severity};
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("service.log");
///
/// let logger = Logger::new();
/// logger.set_out_file(&path);
/// logger.set_format(Format::Iso8601);
/// logger.set_enabled(Severity::Info, false);
///
/// logger.log("first");
/// logger.log("second");
///
/// assert_eq!(std::fs::read_to_string(&path)?, "first\nsecond\n");
/// assert!(!logger.is_enabled(Severity::Info));
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct Logger {
    enables: [AtomicBool; 3],
    verbose: AtomicU32,
    format: AtomicU8,
    state: Mutex<SinkState>,
}

impl Logger {
    /// Creates a logger writing to the process's standard error.
    ///
    /// All severities are enabled, the verbosity level is zero and headers use
    /// [`Format::Default`].
    pub fn new() -> Self {
        Self::with_stderr(io::stderr())
    }

    /// Creates a logger whose stderr channel is `stderr`.
    ///
    /// Lines logged without a configured file and all failure diagnostics go
    /// to this writer.
    pub fn with_stderr<W>(stderr: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            enables: [
                AtomicBool::new(true),
                AtomicBool::new(true),
                AtomicBool::new(true),
            ],
            verbose: AtomicU32::new(0),
            format: AtomicU8::new(Format::Default.to_bits()),
            state: Mutex::new(SinkState {
                destination: Destination::default(),
                stderr: Box::new(stderr),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SinkState> {
        // A panic elsewhere must not take logging down with it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends `line` and a newline to the current destination.
    ///
    /// When a log file is configured it is opened in append mode on first use
    /// and reopened after the path changes. Failures to open or write the
    /// file are reported on the stderr channel and the line is dropped; this
    /// method never fails and never panics.
    pub fn log(&self, line: &str) {
        let mut state = self.lock();
        if let Err(error) = state.deliver(line) {
            state.report(&error);
        }
    }

    /// Like [`log`](Self::log) but hands the failure back instead of
    /// reporting it.
    pub fn try_log(&self, line: &str) -> SinkResult<()> {
        self.lock().deliver(line)
    }

    /// Flushes the stderr channel.
    ///
    /// File output is written unbuffered, one `write` per line, so it has
    /// nothing to flush. Flush errors are ignored.
    pub fn flush(&self) {
        let _ = self.lock().stderr.flush();
    }

    /// Directs subsequent lines to `path`, effective on the next write.
    ///
    /// An empty path is the same as [`clear_out_file`](Self::clear_out_file).
    pub fn set_out_file<P: AsRef<Path>>(&self, path: P) {
        self.lock()
            .destination
            .set_target(Some(path.as_ref().to_path_buf()));
    }

    /// Directs subsequent lines back to the stderr channel.
    pub fn clear_out_file(&self) {
        self.lock().destination.set_target(None);
    }

    /// The configured log file, if any.
    pub fn out_file(&self) -> Option<PathBuf> {
        self.lock().destination.target().map(Path::to_path_buf)
    }

    /// Path of the file handle currently held open, if any.
    ///
    /// After a path change this keeps reporting the old path until the next
    /// write reopens the destination.
    pub fn open_file(&self) -> Option<PathBuf> {
        self.lock().destination.open_path().map(Path::to_path_buf)
    }

    /// Selects the header layout for messages constructed from now on.
    pub fn set_format(&self, format: Format) {
        self.format.store(format.to_bits(), Ordering::Relaxed);
    }

    /// The active header layout.
    pub fn format(&self) -> Format {
        Format::from_bits(self.format.load(Ordering::Relaxed))
    }

    /// Enables or disables call sites of `severity`.
    pub fn set_enabled(&self, severity: Severity, enabled: bool) {
        self.enables[severity.index()].store(enabled, Ordering::Relaxed);
    }

    /// Reports whether call sites of `severity` should log.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.enables[severity.index()].load(Ordering::Relaxed)
    }

    /// Sets the verbosity level.
    pub fn set_verbose_level(&self, level: u32) {
        self.verbose.store(level, Ordering::Relaxed);
    }

    /// The verbosity level.
    pub fn verbose_level(&self) -> u32 {
        self.verbose.load(Ordering::Relaxed)
    }

    /// Reports whether messages gated at `level` should log.
    pub fn is_verbose(&self, level: u32) -> bool {
        self.verbose_level() >= level
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("format", &self.format())
            .field("error", &self.is_enabled(Severity::Error))
            .field("warning", &self.is_enabled(Severity::Warning))
            .field("info", &self.is_enabled(Severity::Info))
            .field("verbose", &self.verbose_level())
            .field("out_file", &self.out_file())
            .finish_non_exhaustive()
    }
}
