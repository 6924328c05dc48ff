//! Algebraic capability traits
//!
//! Coefficients are plain values that know how to add, negate and (for
//! rings) multiply. Vectors and matrices are [`ModuleElement`]s over their
//! coefficient ring: their addition is fallible because two operands may
//! live in different spaces.

use std::fmt;
use std::hash::Hash;

use crate::error::AlgebraResult;

/// Commutative group under addition
pub trait AdditiveGroup: Sized {
    /// Sum of two elements
    fn add(&self, other: &Self) -> Self;

    /// Additive inverse
    fn negate(&self) -> Self;

    /// Whether this is the additive identity
    fn is_zero(&self) -> bool;

    /// Difference of two elements
    fn subtract(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }
}

/// Ring: an additive group with an associative multiplication
pub trait Ring: AdditiveGroup {
    /// Product of two elements
    fn multiply(&self, other: &Self) -> Self;
}

/// Field: a ring in which every non-zero element has an inverse
pub trait Field: Ring {
    /// Multiplicative inverse.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`](crate::AlgebraError::DivisionByZero)
    /// for the additive identity.
    fn invert(&self) -> AlgebraResult<Self>;

    /// Whether this is the multiplicative identity
    fn is_one(&self) -> bool;

    /// Quotient of two elements.
    ///
    /// # Errors
    ///
    /// Fails when `other` is zero.
    fn divide(&self, other: &Self) -> AlgebraResult<Self> {
        Ok(self.multiply(&other.invert()?))
    }
}

/// Token naming a coefficient domain such as `integer` or `rational`.
///
/// Two spaces with equal shape but different kinds are different spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoefficientKind(&'static str);

impl CoefficientKind {
    /// Declare a kind
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// Name of the kind
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CoefficientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A value that may appear as a coefficient of a vector or matrix
pub trait Coefficient:
    Clone + Eq + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// Kind shared by every value of this type
    const KIND: CoefficientKind;

    /// Kind of this particular value
    fn kind(&self) -> CoefficientKind {
        Self::KIND
    }
}

/// Element of a module over the ring `R`
pub trait ModuleElement<R: Ring>: Sized {
    /// Sum of two elements of the same space.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::IncompatibleOperands`](crate::AlgebraError::IncompatibleOperands)
    /// when the operands live in different spaces.
    fn try_add(&self, other: &Self) -> AlgebraResult<Self>;

    /// Additive inverse
    fn negate(&self) -> Self;

    /// Whether every coefficient is zero
    fn is_zero(&self) -> bool;

    /// Multiply every coefficient by `scalar`
    fn scalar_multiply(&self, scalar: &R) -> Self;

    /// Difference of two elements of the same space.
    ///
    /// # Errors
    ///
    /// Same as [`ModuleElement::try_add`].
    fn try_subtract(&self, other: &Self) -> AlgebraResult<Self> {
        self.try_add(&other.negate())
    }
}
