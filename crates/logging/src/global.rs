//! crates/logging/src/global.rs
//! The process-wide logger instance.

use std::sync::OnceLock;

use logging_sink::Logger;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the process-wide logger.
///
/// If nothing was [`install`]ed beforehand, a default [`Logger`] writing to
/// standard error is created on first access.
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(Logger::new)
}

/// Makes `logger` the process-wide logger.
///
/// Must run before the first [`logger`] call to take effect. If a logger is
/// already in place, the rejected one is handed back.
///
/// ```
/// use logging::{Format, Logger, install, logger};
///
/// let custom = Logger::new();
/// custom.set_format(Format::Iso8601);
/// match install(custom) {
///     Ok(installed) => assert_eq!(installed.format(), Format::Iso8601),
///     Err(_rejected) => { /* another part of the process got there first */ }
/// }
/// let _ = logger();
/// ```
pub fn install(logger: Logger) -> Result<&'static Logger, Logger> {
    let mut pending = Some(logger);
    let installed = LOGGER.get_or_init(|| pending.take().unwrap_or_default());
    match pending {
        None => Ok(installed),
        Some(rejected) => Err(rejected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_rejected() {
        let first = logger();
        let rejected = install(Logger::new()).expect_err("global already set");
        drop(rejected);
        assert!(std::ptr::eq(first, logger()));
    }
}
