//! crates/logging/src/message.rs
//! Scope-bound builder for a single log line.

use std::fmt::{self, Write as _};
use std::mem;

use logging_sink::Logger;

use crate::global::logger;
use crate::header::Header;

/// One log line under construction.
///
/// Construction renders the header (severity, UTC timestamp, pid and source
/// location) using the logger's current [`Format`](logging_sink::Format).
/// The caller then appends the body through [`append`](Self::append) or
/// [`fmt::Write`]. Dropping the message publishes the finished line to its
/// [`Logger`] exactly once; [`publish`](Self::publish) is the explicit
/// spelling of the same step.
///
/// # Examples
///
/// ```
/// use std::fmt::Write as _;
/// use logging::{LogMessage, Logger, Severity};
///
/// let logger = Logger::with_stderr(std::io::sink());
/// {
///     let mut message = LogMessage::with_logger(&logger, file!(), line!(), Severity::Info.into());
///     message.append("accepted connection from ");
///     write!(message, "{}:{}", "10.0.0.7", 5432)?;
/// } // published here
/// # Ok::<(), std::fmt::Error>(())
/// ```
#[must_use = "a log message is published when it is dropped"]
pub struct LogMessage<'a> {
    logger: &'a Logger,
    buffer: String,
}

impl LogMessage<'static> {
    /// Starts a message that publishes to the process-wide logger.
    ///
    /// `level` is the raw severity code; values past the last severity are
    /// treated as Info.
    pub fn new(file: &str, line: u32, level: u32) -> Self {
        LogMessage::with_logger(logger(), file, line, level)
    }
}

impl<'a> LogMessage<'a> {
    /// Starts a message that publishes to `logger`.
    pub fn with_logger(logger: &'a Logger, file: &str, line: u32, level: u32) -> Self {
        let mut buffer = String::with_capacity(128);
        let _ = Header::capture(file, line, level).render_into(logger.format(), &mut buffer);
        Self { logger, buffer }
    }

    /// Appends `value` to the message body.
    pub fn append<T: fmt::Display>(&mut self, value: T) -> &mut Self {
        let _ = write!(self.buffer, "{value}");
        self
    }

    /// The line as it would be published right now, header included.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Publishes the line now instead of at the end of the scope.
    pub fn publish(self) {
        drop(self);
    }
}

impl fmt::Write for LogMessage<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buffer.push_str(s);
        Ok(())
    }
}

impl fmt::Debug for LogMessage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogMessage")
            .field("text", &self.buffer)
            .finish_non_exhaustive()
    }
}

impl Drop for LogMessage<'_> {
    fn drop(&mut self) {
        let line = mem::take(&mut self.buffer);
        self.logger.log(&line);
    }
}
