//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the line logger.
//!
//! [`SinkLayer`] is a tracing-subscriber layer that turns every tracing event
//! into a [`LogMessage`], so code instrumented with the standard tracing
//! macros ends up in the same ordered stream as the `log_*!` call sites.
//!
//! # Level mapping
//!
//! | tracing | line logger |
//! |---------|-------------|
//! | `ERROR` | Error |
//! | `WARN`  | Warning |
//! | `INFO`  | Info |
//! | `DEBUG` | Info, when verbosity >= 1 |
//! | `TRACE` | Info, when verbosity >= 2 |
//!
//! # Usage
//!
//! ```rust,ignore
//! logging::init_tracing()?;
//!
//! tracing::warn!("cache miss ratio {:.2}", ratio);
//! ```

use logging_sink::{Logger, Severity};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::global::logger;
use crate::message::LogMessage;

/// A tracing layer that publishes events to a [`Logger`].
#[derive(Clone, Copy, Debug)]
pub struct SinkLayer {
    logger: &'static Logger,
}

impl SinkLayer {
    /// Creates a layer publishing to `logger`.
    #[must_use]
    pub const fn new(logger: &'static Logger) -> Self {
        Self { logger }
    }

    /// Creates a layer publishing to the process-wide logger.
    #[must_use]
    pub fn global() -> Self {
        Self::new(logger())
    }

    /// Severity for a tracing level, or `None` when the logger's verbosity
    /// suppresses it.
    fn severity_for(&self, level: Level) -> Option<Severity> {
        match level {
            Level::ERROR => Some(Severity::Error),
            Level::WARN => Some(Severity::Warning),
            Level::INFO => Some(Severity::Info),
            Level::DEBUG => self.logger.is_verbose(1).then_some(Severity::Info),
            Level::TRACE => self.logger.is_verbose(2).then_some(Severity::Info),
        }
    }
}

impl<S> Layer<S> for SinkLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let Some(severity) = self.severity_for(*metadata.level()) else {
            return;
        };
        if !self.logger.is_enabled(severity) {
            return;
        }

        let file = metadata.file().unwrap_or_else(|| metadata.target());
        let line = metadata.line().unwrap_or(0);
        let mut message = LogMessage::with_logger(self.logger, file, line, severity.as_level());
        event.record(&mut MessageVisitor {
            message: &mut message,
        });
    }
}

/// Copies the event's `message` field into the log line body.
struct MessageVisitor<'m, 'l> {
    message: &'m mut LogMessage<'l>,
}

impl tracing::field::Visit for MessageVisitor<'_, '_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message.append(format_args!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message.append(value);
        }
    }
}

/// Installs a global tracing subscriber that publishes to the process-wide
/// logger.
pub fn init_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(SinkLayer::global())
        .try_init()
}

/// Installs a global tracing subscriber with an additional filter layer in
/// front of the logger.
///
/// # Example
///
/// ```rust,ignore
/// use tracing_subscriber::EnvFilter;
///
/// logging::init_tracing_with_filter(EnvFilter::from_default_env())?;
/// ```
pub fn init_tracing_with_filter<F>(filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(SinkLayer::global())
        .try_init()
}
