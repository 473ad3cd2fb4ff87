//! crates/logging/src/header.rs
//! Per-line header construction.
//!
//! A header is a pure function of the format, severity, UTC timestamp,
//! process id and source location; [`Header::capture`] gathers the ambient
//! parts (clock, pid) for a call site and [`Header::render_into`] lays them
//! out.

use std::fmt;

use logging_sink::{Format, Severity};
use time::{OffsetDateTime, UtcOffset};

/// Returns the final component of a source path.
///
/// Directory components are stripped using the platform's path separators,
/// so headers stay stable regardless of where the build tree lives.
///
/// ```
/// use logging::source_basename;
///
/// assert_eq!(source_basename("src/net/server.rs"), "server.rs");
/// assert_eq!(source_basename("server.rs"), "server.rs");
/// ```
pub fn source_basename(path: &str) -> &str {
    path.rsplit(std::path::is_separator).next().unwrap_or(path)
}

/// Fields rendered in front of every log line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header<'a> {
    /// Severity of the line, already clamped.
    pub severity: Severity,
    /// Time the message was created.
    pub timestamp: OffsetDateTime,
    /// Process id of the writer.
    pub pid: u32,
    /// Source file name without directories.
    pub file: &'a str,
    /// Source line number.
    pub line: u32,
}

impl<'a> Header<'a> {
    /// Builds a header for a call site at the current UTC time.
    ///
    /// `level` is clamped to the defined severities and `file` is reduced to
    /// its final path component.
    pub fn capture(file: &'a str, line: u32, level: u32) -> Self {
        Self {
            severity: Severity::from_level(level),
            timestamp: OffsetDateTime::now_utc(),
            pid: std::process::id(),
            file: source_basename(file),
            line,
        }
    }

    /// Writes the header in `format` to `out`.
    ///
    /// The timestamp is converted to UTC first. No line terminator is
    /// written.
    pub fn render_into<W>(&self, format: Format, out: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        let ts = self.timestamp.to_offset(UtcOffset::UTC);
        match format {
            Format::Default => write!(
                out,
                "{}{:02}{:02} {:02}:{:02}:{:02}.{:06} {} {}:{}] ",
                self.severity.tag(),
                u8::from(ts.month()),
                ts.day(),
                ts.hour(),
                ts.minute(),
                ts.second(),
                ts.microsecond(),
                self.pid,
                self.file,
                self.line,
            ),
            Format::Iso8601 => write!(
                out,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z {} {} {}:{}] ",
                ts.year(),
                u8::from(ts.month()),
                ts.day(),
                ts.hour(),
                ts.minute(),
                ts.second(),
                self.severity.tag(),
                self.pid,
                self.file,
                self.line,
            ),
        }
    }

    /// Renders the header in `format` into a new string.
    pub fn render(&self, format: Format) -> String {
        let mut out = String::with_capacity(48 + self.file.len());
        // Writing into a String cannot fail.
        let _ = self.render_into(format, &mut out);
        out
    }
}
