//! Diagnostic logging for Herald programs.
//!
//! Standard output belongs to command output, so the subscriber installed
//! here writes to standard error at `warn` unless configured otherwise.
//! `RUST_LOG`, when set, replaces the configured base level.
//!
//! ```rust,ignore
//! use herald_runtime::config::ConfigLoader;
//! use herald_runtime::logging::{self, LoggingBuilder};
//!
//! // From configuration
//! let config = ConfigLoader::new("hammer").load()?;
//! logging::init_from_config(&config.logging);
//!
//! // Or by hand
//! LoggingBuilder::new()
//!     .directive("herald_framework=debug")
//!     .init();
//! ```

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::{LogFormat, LogOutput, LoggingConfig, SpanEventConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Installs a global subscriber for `config`.
///
/// Does nothing if a subscriber is already installed.
pub fn init_from_config(config: &LoggingConfig) {
    LoggingBuilder::from_config(config).init();
}

/// Which `dispatch` span events are logged. Each nested dispatch opens one
/// such span carrying its command path.
fn fmt_span(events: &SpanEventConfig) -> FmtSpan {
    [
        (events.new, FmtSpan::NEW),
        (events.enter, FmtSpan::ENTER),
        (events.exit, FmtSpan::EXIT),
        (events.close, FmtSpan::CLOSE),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .fold(FmtSpan::NONE, |acc, (_, span)| acc | span)
}

/// Builds and installs the logging subscriber.
#[derive(Debug, Default)]
pub struct LoggingBuilder {
    level: Option<tracing::Level>,
    directives: Vec<String>,
    span_events: SpanEventConfig,
    format: LogFormat,
    output: LogOutput,
    file_path: Option<PathBuf>,
    thread_ids: bool,
    file_location: bool,
}

impl LoggingBuilder {
    /// Compact lines on standard error at `warn`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &LoggingConfig) -> Self {
        let directives = config
            .filters
            .iter()
            .map(|(target, level)| format!("{target}={}", level.to_lowercase()))
            .collect();

        Self {
            level: Some(config.level.to_tracing_level()),
            directives,
            span_events: config.span_events,
            format: config.format,
            output: config.output,
            file_path: config.file_path.clone(),
            thread_ids: config.thread_ids,
            file_location: config.file_location,
        }
    }

    pub fn with_level(mut self, level: tracing::Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a filter directive such as `herald_framework=trace`.
    pub fn directive(mut self, directive: &str) -> Self {
        self.directives.push(directive.to_string());
        self
    }

    pub fn span_events(mut self, events: SpanEventConfig) -> Self {
        self.span_events = events;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the destination. [`LogOutput::File`] needs a
    /// [`file_path`](Self::file_path).
    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    fn build_filter(&self) -> EnvFilter {
        let base = self.level.unwrap_or(tracing::Level::WARN);
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(base.to_string().to_lowercase()));

        // Malformed directives are rejected by `validate_config`.
        self.directives
            .iter()
            .filter_map(|directive| directive.parse::<Directive>().ok())
            .fold(filter, EnvFilter::add_directive)
    }

    /// Returns the writer and whether a requested log file had to be
    /// replaced by standard error.
    fn make_writer(&self) -> (BoxMakeWriter, bool) {
        match (self.output, &self.file_path) {
            (LogOutput::Stdout, _) => (BoxMakeWriter::new(std::io::stdout), false),
            (LogOutput::Stderr, _) => (BoxMakeWriter::new(std::io::stderr), false),
            (LogOutput::File, Some(path)) => {
                let appender = tracing_appender::rolling::never(
                    path.parent().unwrap_or_else(|| Path::new(".")),
                    path.file_name().unwrap_or_else(|| OsStr::new("herald.log")),
                );
                (BoxMakeWriter::new(appender), false)
            }
            (LogOutput::File, None) => (BoxMakeWriter::new(std::io::stderr), true),
        }
    }

    fn build_layer(&self, writer: BoxMakeWriter) -> BoxedLayer {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_span_events(fmt_span(&self.span_events))
            .with_thread_ids(self.thread_ids)
            .with_file(self.file_location)
            .with_line_number(self.file_location);

        match self.format {
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Full => layer.boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
        }
    }

    /// Installs the subscriber, ignoring an already installed one.
    pub fn init(self) {
        let _ = self.try_init();
    }

    pub fn try_init(self) -> Result<(), TryInitError> {
        let (writer, missing_file) = self.make_writer();
        tracing_subscriber::registry()
            .with(self.build_layer(writer))
            .with(self.build_filter())
            .try_init()?;

        if missing_file {
            warn!("File output requested but no file path configured, logging to stderr");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_builder_defaults_to_stderr() {
        let builder = LoggingBuilder::new();
        assert_eq!(builder.output, LogOutput::Stderr);
        assert_eq!(builder.format, LogFormat::Compact);
        assert!(builder.level.is_none());
    }

    #[test]
    fn test_from_config() {
        let mut config = LoggingConfig {
            level: LogLevel::Debug,
            thread_ids: true,
            file_location: true,
            ..Default::default()
        };
        config
            .filters
            .insert("herald_framework".to_string(), "TRACE".to_string());
        config.span_events.close = true;

        let builder = LoggingBuilder::from_config(&config);
        assert_eq!(builder.level, Some(tracing::Level::DEBUG));
        assert_eq!(builder.directives, ["herald_framework=trace"]);
        assert!(builder.thread_ids && builder.file_location);
        assert_eq!(fmt_span(&builder.span_events), FmtSpan::CLOSE);
    }

    #[test]
    fn test_span_event_flags() {
        assert_eq!(fmt_span(&SpanEventConfig::default()), FmtSpan::NONE);

        let all = SpanEventConfig {
            new: true,
            enter: true,
            exit: true,
            close: true,
        };
        assert_eq!(fmt_span(&all), FmtSpan::FULL);
    }

    #[test]
    fn test_file_output_without_path_falls_back() {
        let builder = LoggingBuilder::new().output(LogOutput::File);
        assert!(builder.make_writer().1);

        let builder = builder.file_path(std::env::temp_dir().join("herald-test.log"));
        assert!(!builder.make_writer().1);
    }
}
