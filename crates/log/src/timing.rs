//! Timing utilities

use std::time::{Duration, Instant};

/// Measures a named operation and logs the elapsed time on completion
#[derive(Debug)]
pub struct Timer {
    name: String,
    start: Instant,
    level: tracing::Level,
    threshold: Option<Duration>,
}

impl Timer {
    /// Create a new timer
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            level: tracing::Level::DEBUG,
            threshold: None,
        }
    }

    /// Set the log level
    #[must_use = "builder methods must be chained or built"]
    pub fn level(mut self, level: tracing::Level) -> Self {
        self.level = level;
        self
    }

    /// Only log if duration exceeds threshold
    #[must_use = "builder methods must be chained or built"]
    pub fn threshold(mut self, duration: Duration) -> Self {
        self.threshold = Some(duration);
        self
    }

    /// Name given at construction
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Complete the timer, returning the elapsed time
    pub fn complete(self) -> Duration {
        let elapsed = self.elapsed();

        if self.threshold.is_some_and(|threshold| elapsed < threshold) {
            return elapsed;
        }

        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        match self.level {
            tracing::Level::ERROR => tracing::error!(name = %self.name, micros, "timer completed"),
            tracing::Level::WARN => tracing::warn!(name = %self.name, micros, "timer completed"),
            tracing::Level::INFO => tracing::info!(name = %self.name, micros, "timer completed"),
            tracing::Level::DEBUG => tracing::debug!(name = %self.name, micros, "timer completed"),
            tracing::Level::TRACE => tracing::trace!(name = %self.name, micros, "timer completed"),
        }

        elapsed
    }
}
