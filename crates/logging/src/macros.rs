//! crates/logging/src/macros.rs
//! Call-site macros.
//!
//! Each macro checks the logger's enable flag (and, for verbose messages, its
//! verbosity level) before anything is formatted, then builds a
//! [`LogMessage`](crate::LogMessage) tagged with the invoking file and line.
//! The message is published when the macro's block ends.
//!
//! Every macro accepts an optional `logger = <expr>;` prefix to target a
//! specific [`Logger`](crate::Logger) instead of the process-wide one.

/// Logs a message at an explicit [`Severity`](crate::Severity).
///
/// # Example
/// ```
/// use logging::{Logger, Severity, log_at};
///
/// let logger = Logger::with_stderr(std::io::sink());
/// log_at!(logger = &logger; Severity::Warning, "retrying in {}s", 5);
/// ```
#[macro_export]
macro_rules! log_at {
    (logger = $logger:expr; $severity:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = $logger;
        let severity: $crate::Severity = $severity;
        if logger.is_enabled(severity) {
            let mut message = $crate::LogMessage::with_logger(
                logger,
                ::core::file!(),
                ::core::line!(),
                severity.as_level(),
            );
            message.append(::core::format_args!($($arg)+));
        }
    }};
    ($severity:expr, $($arg:tt)+) => {
        $crate::log_at!(logger = $crate::logger(); $severity, $($arg)+)
    };
}

/// Logs an error.
///
/// # Example
/// ```ignore
/// log_error!("failed to bind {}: {}", addr, err);
/// ```
#[macro_export]
macro_rules! log_error {
    (logger = $logger:expr; $($arg:tt)+) => {
        $crate::log_at!(logger = $logger; $crate::Severity::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Severity::Error, $($arg)+)
    };
}

/// Logs a warning.
///
/// # Example
/// ```ignore
/// log_warning!("queue depth {} above threshold", depth);
/// ```
#[macro_export]
macro_rules! log_warning {
    (logger = $logger:expr; $($arg:tt)+) => {
        $crate::log_at!(logger = $logger; $crate::Severity::Warning, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Severity::Warning, $($arg)+)
    };
}

/// Logs an informational message.
///
/// # Example
/// ```ignore
/// log_info!("listening on {}", addr);
/// ```
#[macro_export]
macro_rules! log_info {
    (logger = $logger:expr; $($arg:tt)+) => {
        $crate::log_at!(logger = $logger; $crate::Severity::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::Severity::Info, $($arg)+)
    };
}

/// Logs an informational message when the verbosity level is at least
/// `level`.
///
/// # Example
/// ```ignore
/// log_verbose!(2, "frame {} decoded in {:?}", id, elapsed);
/// ```
#[macro_export]
macro_rules! log_verbose {
    (logger = $logger:expr; $level:expr, $($arg:tt)+) => {{
        let logger: &$crate::Logger = $logger;
        if logger.is_verbose($level) {
            $crate::log_at!(logger = logger; $crate::Severity::Info, $($arg)+);
        }
    }};
    ($level:expr, $($arg:tt)+) => {
        $crate::log_verbose!(logger = $crate::logger(); $level, $($arg)+)
    };
}
