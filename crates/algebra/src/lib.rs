//! # lattice-algebra
//!
//! Parameterized algebraic structures built on canonical, weakly cached
//! spaces.
//!
//! This crate provides:
//! - [`Integer`] and [`Rational`]: exact coefficient types
//! - [`AdditiveGroup`], [`Ring`], [`Field`], [`ModuleElement`]: capability
//!   traits
//! - [`SpaceRegistry`]: hands out one canonical [`VectorSpace`] or
//!   [`MatrixSpace`] per coefficient kind and shape
//! - [`Vector`] and [`Matrix`]: immutable values whose negation, hash code
//!   and rendering are computed at most once
//!
//! ## Quick Start
//!
//! ```rust
//! use lattice_algebra::prelude::*;
//!
//! let a = Matrix::from_rows(vec![
//!     vec![Integer::from(1), Integer::from(2)],
//!     vec![Integer::from(3), Integer::from(4)],
//! ])?;
//! let square = a.multiply(&a)?;
//! assert_eq!(square.to_string(), "[ 7 10]\n[15 22]");
//!
//! // Same shape, same space object.
//! assert!(square.space().ptr_eq(a.space()));
//!
//! // Negating twice hands back the original storage.
//! assert!(a.negate().negate().ptr_eq(&a));
//! # Ok::<(), AlgebraError>(())
//! ```

#![warn(rust_2018_idioms)]

// Error types
pub mod error;

// Core modules
pub mod matrix;
pub mod number;
pub mod space;
pub mod traits;
pub mod vector;

mod value;

pub use crate::error::{AlgebraError, AlgebraResult};
pub use crate::matrix::{Matrix, MatrixSpace};
pub use crate::number::{Integer, Rational};
pub use crate::space::{MatrixSpaceKey, SpaceRegistry, VectorSpaceKey};
pub use crate::traits::{AdditiveGroup, Coefficient, CoefficientKind, Field, ModuleElement, Ring};
pub use crate::vector::{Vector, VectorSpace};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AdditiveGroup, AlgebraError, AlgebraResult, Coefficient, CoefficientKind, Field, Integer,
        Matrix, MatrixSpace, ModuleElement, Rational, Ring, SpaceRegistry, Vector, VectorSpace,
    };
}
