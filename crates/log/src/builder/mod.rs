//! Logger builder implementation

#[macro_use]
mod format;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format, Writer};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard returned by a successful initialization.
///
/// Holding it documents that the global subscriber is installed for the
/// rest of the process; events are flushed synchronously so dropping it
/// has no further effect.
#[must_use = "the logger guard should be held for the lifetime of the program"]
#[derive(Debug)]
pub struct LoggerGuard {
    format: Format,
}

impl LoggerGuard {
    /// Format the installed subscriber writes
    pub fn format(&self) -> Format {
        self.format
    }
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Override the level filter
    #[must_use = "builder methods must be chained or built"]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    /// Override the output format
    #[must_use = "builder methods must be chained or built"]
    pub fn with_format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    /// Configuration that [`LoggerBuilder::build`] will install
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse the level filter without installing anything
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Filter`] when the filter string is malformed.
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level).map_err(|e| LogError::filter(&self.config.level, e))
    }

    /// Build and install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = self.filter()?;
        let display = &self.config.display;
        let writer = make_writer(self.config.writer);

        let installed = match self.config.format {
            Format::Pretty => Registry::default()
                .with(filter)
                .with(create_fmt_layer!(pretty, display, writer))
                .try_init(),
            Format::Compact => Registry::default()
                .with(filter)
                .with(create_fmt_layer!(compact, display, writer))
                .try_init(),
            Format::Json => Registry::default()
                .with(filter)
                .with(create_json_layer!(display, writer))
                .try_init(),
        };
        installed.map_err(|e| LogError::Init(e.to_string()))?;

        tracing::debug!(
            level = %self.config.level,
            format = %self.config.format,
            "logger initialized"
        );
        Ok(LoggerGuard {
            format: self.config.format,
        })
    }
}

fn make_writer(writer: Writer) -> BoxMakeWriter {
    match writer {
        Writer::Stderr => BoxMakeWriter::new(std::io::stderr),
        Writer::Stdout => BoxMakeWriter::new(std::io::stdout),
    }
}
