//! Exact rational numbers

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, Zero};

use super::Integer;
use crate::error::{AlgebraError, AlgebraResult};
use crate::traits::{AdditiveGroup, Coefficient, CoefficientKind, Field, Ring};

/// Fraction `numerator / denominator` kept in lowest terms.
///
/// Invariants: the denominator is strictly positive and shares no factor
/// with the numerator; zero is always `0/1`. Structural equality and hashing
/// therefore coincide with numeric equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "String", try_from = "String"))]
pub struct Rational {
    numerator: BigInt,
    denominator: BigInt,
}

impl Rational {
    /// Build `numerator / denominator` in lowest terms.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] for a zero denominator.
    pub fn new(numerator: impl Into<BigInt>, denominator: impl Into<BigInt>) -> AlgebraResult<Self> {
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(Self::reduced(numerator.into(), denominator))
    }

    /// Rational with denominator one
    #[must_use]
    pub fn from_integer(value: &Integer) -> Self {
        Self {
            numerator: value.as_bigint().clone(),
            denominator: BigInt::one(),
        }
    }

    #[must_use]
    pub fn zero() -> Self {
        Self {
            numerator: BigInt::zero(),
            denominator: BigInt::one(),
        }
    }

    #[must_use]
    pub fn one() -> Self {
        Self {
            numerator: BigInt::one(),
            denominator: BigInt::one(),
        }
    }

    /// Numerator in lowest terms, carrying the sign
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::new(self.numerator.clone())
    }

    /// Denominator in lowest terms, always positive
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::new(self.denominator.clone())
    }

    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.numerator.is_positive()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.numerator.is_negative()
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        }
    }

    /// Normalise a fraction whose denominator is known to be non-zero
    fn reduced(numerator: BigInt, denominator: BigInt) -> Self {
        if numerator.is_zero() {
            return Self::zero();
        }
        let divisor = numerator.gcd(&denominator);
        let (mut numerator, mut denominator) = (numerator / &divisor, denominator / &divisor);
        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }
        Self {
            numerator,
            denominator,
        }
    }
}

impl AdditiveGroup for Rational {
    fn add(&self, other: &Self) -> Self {
        Self::reduced(
            &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            &self.denominator * &other.denominator,
        )
    }

    fn negate(&self) -> Self {
        Self {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }

    fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }
}

impl Ring for Rational {
    fn multiply(&self, other: &Self) -> Self {
        Self::reduced(
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }
}

impl Field for Rational {
    fn invert(&self) -> AlgebraResult<Self> {
        if self.numerator.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(Self::reduced(self.denominator.clone(), self.numerator.clone()))
    }

    fn is_one(&self) -> bool {
        self.numerator.is_one() && self.denominator.is_one()
    }
}

impl Coefficient for Rational {
    const KIND: CoefficientKind = CoefficientKind::new("rational");
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying keeps the order.
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator.is_one() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for Rational {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_part = |part: &str| {
            part.trim()
                .parse::<BigInt>()
                .map_err(|e| AlgebraError::parse(s, e))
        };

        match s.split_once('/') {
            Some((numerator, denominator)) => {
                Self::new(parse_part(numerator)?, parse_part(denominator)?)
            }
            None => Ok(Self::reduced(parse_part(s)?, BigInt::one())),
        }
    }
}

impl From<Rational> for String {
    fn from(value: Rational) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Rational {
    type Error = AlgebraError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Rational {
                fn from(value: $t) -> Self {
                    Self {
                        numerator: BigInt::from(value),
                        denominator: BigInt::one(),
                    }
                }
            }
        )*
    };
}

impl_from_primitive!(i32, i64, u32, u64);

impl From<Integer> for Rational {
    fn from(value: Integer) -> Self {
        Self {
            numerator: value.into_bigint(),
            denominator: BigInt::one(),
        }
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $via:path) => {
        impl $trait<&Rational> for &Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                $via(self, rhs)
            }
        }

        impl $trait for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                $via(&self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add, AdditiveGroup::add);
forward_binop!(Sub, sub, AdditiveGroup::subtract);
forward_binop!(Mul, mul, Ring::multiply);

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        self.negate()
    }
}
