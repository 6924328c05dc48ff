//! Standalone error types for lattice-memory
//!
//! Uses thiserror for clean, idiomatic Rust error definitions. Insertion
//! races and reclaimed slots are normal outcomes and never show up here;
//! only genuine misconfiguration does.

use thiserror::Error;

/// Memory subsystem errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl MemoryError {
    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "MEM:CONFIG:INVALID",
        }
    }

    /// Create invalid config error
    pub fn invalid_config(reason: &str) -> Self {
        Self::InvalidConfig {
            reason: reason.to_string(),
        }
    }

    /// Create invalid cache config error
    pub fn invalid_cache_config(reason: &str) -> Self {
        Self::InvalidConfig {
            reason: format!("invalid cache config: {reason}"),
        }
    }
}

/// Result type for memory operations
pub type MemoryResult<T> = core::result::Result<T, MemoryError>;

/// Generic result type alias
pub type Result<T> = MemoryResult<T>;
