#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` is the producer side of the line logger. A call site builds a
//! [`LogMessage`] (directly or through the `log_*!` macros), streams text into
//! it and lets it fall out of scope; the message then hands one finished line
//! to a [`Logger`] from the `logging-sink` crate.
//!
//! # Design
//!
//! Each message renders its header at construction time, using the logger's
//! current [`Format`]:
//!
//! ```text
//! Default  I0304 12:08:45.123456 5821 server.cc:42] body
//! Iso8601  2024-03-04T12:08:45Z I 5821 server.cc:42] body
//! ```
//!
//! Timestamps are UTC with microsecond resolution, the pid is the writer's
//! process id and the file is the final component of the source path.
//! Publishing happens in `Drop`, so a message is delivered exactly once even
//! when its scope is left by an early return or a panic.
//!
//! The process-wide logger is an explicit [`Logger`] behind [`logger`] and
//! [`install`]. Everything else takes a `&Logger`, so tests and embedders can
//! work with isolated instances.
//!
//! # Invariants
//!
//! - Severity codes above Info are clamped to Info, never rejected.
//! - Enable flags and verbosity are checked by the macros before any
//!   formatting; the sink itself never filters.
//! - A header never carries a line terminator; the sink appends it.
//!
//! # Examples
//!
//! ```
//! use logging::{Logger, Severity, log_info, log_verbose, log_warning};
//!
//! let logger = Logger::with_stderr(std::io::sink());
//! logger.set_verbose_level(1);
//! logger.set_enabled(Severity::Info, true);
//!
//! log_warning!(logger = &logger; "slow response: {} ms", 1200);
//! log_info!(logger = &logger; "served {} requests", 42);
//! log_verbose!(logger = &logger; 2, "suppressed at verbosity 1");
//! ```
//!
//! # See also
//!
//! - `logging-sink` for the [`Logger`] itself.

mod config;
mod global;
mod header;
mod macros;
mod message;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::LoggingConfig;
pub use global::{install, logger};
pub use header::{Header, source_basename};
pub use logging_sink::{Format, Logger, Severity, SinkError};
pub use message::LogMessage;
#[cfg(feature = "tracing")]
pub use tracing_bridge::{SinkLayer, init_tracing, init_tracing_with_filter};
