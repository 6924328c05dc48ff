//! Error handling for lattice-log

use thiserror::Error;

/// Errors raised while configuring or installing the logger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LogError {
    /// The level filter could not be parsed
    #[error("Invalid filter: {0}")]
    Filter(String),

    /// A configuration value is not recognised
    #[error("Configuration error: {0}")]
    Config(String),

    /// The global subscriber could not be installed
    #[error("Logger initialization failed: {0}")]
    Init(String),
}

impl LogError {
    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Filter(_) => "LOG:FILTER",
            Self::Config(_) => "LOG:CONFIG",
            Self::Init(_) => "LOG:INIT",
        }
    }

    /// Create a filter parsing error
    pub fn filter(filter: &str, reason: impl std::fmt::Display) -> Self {
        Self::Filter(format!("'{filter}': {reason}"))
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// Result type for logger operations
pub type LogResult<T> = Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_mentions_filter() {
        let error = LogError::filter("lattice=loud", "invalid level");
        assert_eq!(error.to_string(), "Invalid filter: 'lattice=loud': invalid level");
        assert_eq!(error.code(), "LOG:FILTER");
    }

    #[test]
    fn test_codes() {
        assert_eq!(LogError::config("x").code(), "LOG:CONFIG");
        assert_eq!(LogError::Init("x".into()).code(), "LOG:INIT");
    }
}
