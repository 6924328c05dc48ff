//! Concrete coefficient types
//!
//! - [`Integer`]: arbitrary precision integer, a [`Ring`](crate::Ring)
//! - [`Rational`]: reduced fraction of integers, a [`Field`](crate::Field)

mod integer;
mod rational;

pub use integer::Integer;
pub use rational::Rational;
