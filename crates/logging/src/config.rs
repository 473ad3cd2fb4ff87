//! crates/logging/src/config.rs
//! Snapshot of a logger's runtime configuration.

use std::path::PathBuf;

use logging_sink::{Format, Logger, Severity};

/// Destination, header format, enable flags and verbosity of a [`Logger`].
///
/// The defaults match a freshly constructed logger: standard error, the
/// default header layout, every severity enabled, verbosity zero.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggingConfig {
    /// Append-only log file; `None` writes to standard error.
    pub out_file: Option<PathBuf>,
    /// Header layout.
    pub format: Format,
    /// Whether error call sites log.
    pub error: bool,
    /// Whether warning call sites log.
    pub warning: bool,
    /// Whether info call sites log.
    pub info: bool,
    /// Verbosity level for verbose call sites.
    pub verbose: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            out_file: None,
            format: Format::Default,
            error: true,
            warning: true,
            info: true,
            verbose: 0,
        }
    }
}

impl LoggingConfig {
    /// Reads the current configuration of `logger`.
    pub fn from_logger(logger: &Logger) -> Self {
        Self {
            out_file: logger.out_file(),
            format: logger.format(),
            error: logger.is_enabled(Severity::Error),
            warning: logger.is_enabled(Severity::Warning),
            info: logger.is_enabled(Severity::Info),
            verbose: logger.verbose_level(),
        }
    }

    /// Whether call sites of `severity` log under this configuration.
    pub const fn enabled(&self, severity: Severity) -> bool {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    /// Enables or disables `severity`.
    pub fn set_enabled(&mut self, severity: Severity, enabled: bool) {
        match severity {
            Severity::Error => self.error = enabled,
            Severity::Warning => self.warning = enabled,
            Severity::Info => self.info = enabled,
        }
    }

    /// Pushes this configuration into `logger`.
    ///
    /// A changed destination takes effect on the logger's next write.
    pub fn apply(&self, logger: &Logger) {
        match &self.out_file {
            Some(path) => logger.set_out_file(path),
            None => logger.clear_out_file(),
        }
        logger.set_format(self.format);
        for severity in Severity::ALL {
            logger.set_enabled(severity, self.enabled(severity));
        }
        logger.set_verbose_level(self.verbose);
    }

    /// Builds a logger writing to standard error and applies this
    /// configuration to it.
    pub fn build(&self) -> Logger {
        let logger = Logger::new();
        self.apply(&logger);
        logger
    }
}
