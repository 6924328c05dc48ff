//! Error types for lattice-algebra
//!
//! Every variant is a precondition violation reported at the offending
//! call. Races inside the space registry are resolved internally and never
//! appear here.

use lattice_memory::MemoryError;
use thiserror::Error;

/// Algebra errors
#[must_use = "errors should be handled"]
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlgebraError {
    // --- Shape Errors ---
    #[error("Shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },

    #[error("Invalid shape: {reason}")]
    InvalidShape { reason: String },

    // --- Type Errors ---
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    // --- Arithmetic Errors ---
    #[error("Incompatible operands: {reason}")]
    IncompatibleOperands { reason: String },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Cannot parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    // --- Infrastructure ---
    #[error(transparent)]
    Cache(#[from] MemoryError),
}

impl AlgebraError {
    /// Get error code for categorization
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { .. } => "ALG:SHAPE:MISMATCH",
            Self::InvalidShape { .. } => "ALG:SHAPE:INVALID",
            Self::TypeMismatch { .. } => "ALG:TYPE:MISMATCH",
            Self::IncompatibleOperands { .. } => "ALG:OPERANDS:INCOMPATIBLE",
            Self::DivisionByZero => "ALG:ARITH:DIV_ZERO",
            Self::Parse { .. } => "ALG:PARSE",
            Self::Cache(_) => "ALG:CACHE",
        }
    }

    /// Create shape mismatch error
    pub fn shape_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create invalid shape error
    pub fn invalid_shape(reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            reason: reason.into(),
        }
    }

    /// Create type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create incompatible operands error
    pub fn incompatible(reason: impl Into<String>) -> Self {
        Self::IncompatibleOperands {
            reason: reason.into(),
        }
    }

    /// Create parse error
    pub fn parse(input: &str, reason: impl std::fmt::Display) -> Self {
        Self::Parse {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error is caused by the shape of the operands
    #[must_use]
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. } | Self::InvalidShape { .. } | Self::IncompatibleOperands { .. }
        )
    }
}

/// Result type for algebra operations
pub type AlgebraResult<T> = Result<T, AlgebraError>;
