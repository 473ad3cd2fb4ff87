#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! crates/logging-sink/src/lib.rs
//!
//! # Overview
//!
//! `logging-sink` provides the [`Logger`]: the single, process-wide owner of
//! the log destination. It accepts finished lines from any thread and appends
//! them, one at a time, either to standard error or to an append-only log
//! file. The crate also defines the vocabulary shared with the message layer:
//! [`Severity`] and the header [`Format`].
//!
//! # Design
//!
//! The destination state (configured path, pending-change flag and open file
//! handle) lives behind one [`std::sync::Mutex`]. [`Logger::log`] holds that
//! lock for exactly one line: open the file if needed, append the line and its
//! terminator in a single write, release. Changing the path only records the
//! new target; the stale handle is closed and the new file opened by the next
//! write. The header format, the per-severity enable flags and the verbosity
//! level are atomics and can be read without taking the lock.
//!
//! # Invariants
//!
//! - At most one file handle is open, and it was opened against the path that
//!   is configured at the time of every write.
//! - Lines are never interleaved: each one is written whole under the lock.
//! - An empty or unset path means "write to standard error" and is not an
//!   error condition.
//! - Out-of-range severity codes are clamped to [`Severity::Info`].
//!
//! # Errors
//!
//! [`Logger::log`] never fails. Open and write failures are formatted from
//! [`SinkError`] onto the logger's stderr channel and the affected line is
//! dropped; the next call starts over with a fresh open. Callers that want the
//! error itself use [`Logger::try_log`].
//!
//! # Examples
//!
//! ```
//! use logging_sink::{Logger, Severity};
//!
//! let logger = Logger::new();
//! if logger.is_enabled(Severity::Warning) {
//!     logger.log("W0304 12:08:45.123456 5821 main.rs:7] disk almost full");
//! }
//! logger.flush();
//! ```
//!
//! # See also
//!
//! - `logging` crate for `LogMessage`, header rendering, the process-wide
//!   accessor and the `log_*!` macros.

mod destination;
mod error;
mod format;
mod logger;
mod severity;

pub use error::{ParseFormatError, ParseSeverityError, SinkError, SinkResult};
pub use format::Format;
pub use logger::Logger;
pub use severity::Severity;
