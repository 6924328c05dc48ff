//! Arbitrary precision integers

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{One, Signed, Zero};

use crate::error::{AlgebraError, AlgebraResult};
use crate::traits::{AdditiveGroup, Coefficient, CoefficientKind, Ring};

/// Integer of unbounded magnitude.
///
/// Forms a [`Ring`]; division is only available through the explicit
/// [`Integer::divide`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Integer(BigInt);

impl Integer {
    /// Wrap a big integer
    #[must_use]
    pub const fn new(value: BigInt) -> Self {
        Self(value)
    }

    /// Additive identity
    #[must_use]
    pub fn zero() -> Self {
        Self(BigInt::zero())
    }

    /// Multiplicative identity
    #[must_use]
    pub fn one() -> Self {
        Self(BigInt::one())
    }

    /// Underlying big integer
    #[must_use]
    pub fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// Consume into the underlying big integer
    #[must_use]
    pub fn into_bigint(self) -> BigInt {
        self.0
    }

    /// Absolute value
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Greatest common divisor, always non-negative
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(self.0.gcd(&other.0))
    }

    /// Quotient truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`AlgebraError::DivisionByZero`] when `divisor` is zero.
    pub fn divide(&self, divisor: &Self) -> AlgebraResult<Self> {
        if divisor.0.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(Self(&self.0 / &divisor.0))
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
}

impl AdditiveGroup for Integer {
    fn add(&self, other: &Self) -> Self {
        Self(&self.0 + &other.0)
    }

    fn negate(&self) -> Self {
        Self(-&self.0)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Ring for Integer {
    fn multiply(&self, other: &Self) -> Self {
        Self(&self.0 * &other.0)
    }
}

impl Coefficient for Integer {
    const KIND: CoefficientKind = CoefficientKind::new("integer");
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Integer {
    type Err = AlgebraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<BigInt>()
            .map(Self)
            .map_err(|e| AlgebraError::parse(s, e))
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Integer {
                fn from(value: $t) -> Self {
                    Self(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_primitive!(i32, i64, i128, u32, u64, usize);

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        Self(value)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&Integer> for &Integer {
            type Output = Integer;

            fn $method(self, rhs: &Integer) -> Integer {
                Integer(&self.0 $op &rhs.0)
            }
        }

        impl $trait for Integer {
            type Output = Integer;

            fn $method(self, rhs: Integer) -> Integer {
                Integer(self.0 $op rhs.0)
            }
        }
    };
}

forward_binop!(Add, add, +);
forward_binop!(Sub, sub, -);
forward_binop!(Mul, mul, *);

impl Neg for Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        Integer(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Integer {
        Integer(-&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_group_operations() {
        let a = Integer::from(7);
        let b = Integer::from(-3);
        assert_eq!(AdditiveGroup::add(&a, &b), Integer::from(4));
        assert_eq!(a.subtract(&b), Integer::from(10));
        assert_eq!(a.negate(), Integer::from(-7));
        assert!(Integer::zero().is_zero());
        assert_eq!(a.multiply(&b), Integer::from(-21));
    }

    #[test]
    fn test_operators_match_trait_methods() {
        let a = Integer::from(12);
        let b = Integer::from(5);
        assert_eq!(&a + &b, Integer::from(17));
        assert_eq!(&a - &b, Integer::from(7));
        assert_eq!(&a * &b, Integer::from(60));
        assert_eq!(-&a, Integer::from(-12));
        assert_eq!(a.clone() * b.clone(), a.multiply(&b));
    }

    #[rstest]
    #[case(7, 2, 3)]
    #[case(-7, 2, -3)]
    #[case(7, -2, -3)]
    #[case(0, 5, 0)]
    fn test_divide_truncates(#[case] n: i64, #[case] d: i64, #[case] expected: i64) {
        let quotient = Integer::from(n).divide(&Integer::from(d)).unwrap();
        assert_eq!(quotient, Integer::from(expected));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Integer::from(1).divide(&Integer::zero()),
            Err(AlgebraError::DivisionByZero)
        );
    }

    #[test]
    fn test_gcd_and_abs() {
        assert_eq!(Integer::from(-12).gcd(&Integer::from(18)), Integer::from(6));
        assert_eq!(Integer::from(-12).abs(), Integer::from(12));
        assert!(Integer::from(-1).is_negative());
        assert!(Integer::from(1).is_positive());
        assert!(!Integer::zero().is_positive());
    }

    #[test]
    fn test_parse_and_display() {
        let big: Integer = "123456789012345678901234567890".parse().unwrap();
        assert_eq!(big.to_string(), "123456789012345678901234567890");
        assert_eq!(" -42 ".parse::<Integer>().unwrap(), Integer::from(-42));

        let err = "4x".parse::<Integer>().unwrap_err();
        assert_eq!(err.code(), "ALG:PARSE");
    }

    #[test]
    fn test_ordering() {
        let mut values = vec![Integer::from(3), Integer::from(-1), Integer::from(2)];
        values.sort();
        assert_eq!(values, vec![Integer::from(-1), Integer::from(2), Integer::from(3)]);
        assert_eq!(Integer::from(3).max(Integer::from(9)), Integer::from(9));
    }

    #[test]
    fn test_kind() {
        assert_eq!(Integer::from(1).kind().name(), "integer");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Integer::from(-5)).unwrap();
        let back: Integer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Integer::from(-5));
    }
}
