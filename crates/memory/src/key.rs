//! Composite structural keys
//!
//! [`PairKey`] addresses cache entries whose identity is made of two
//! attributes, e.g. a coefficient kind and a dimension. Keys nest, so a
//! matrix shape is simply `PairKey<Kind, PairKey<usize, usize>>`.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

/// Bit rotation applied to the hash of the second component before it is
/// combined with the first.
pub const PAIR_HASH_ROTATION: u32 = 7;

/// Immutable two-field key with structural equality.
///
/// The hash is `hash(first) ^ hash(second).rotate_right(7)`, so pairs whose
/// components hash alike (`(3, 3)`, `(5, 5)`, ...) do not all collapse to
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey<A, B> {
    first: A,
    second: B,
}

impl<A, B> PairKey<A, B> {
    /// Create a key from its two components
    #[inline]
    pub const fn of(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// First component
    #[inline]
    pub const fn first(&self) -> &A {
        &self.first
    }

    /// Second component
    #[inline]
    pub const fn second(&self) -> &B {
        &self.second
    }

    /// Split the key back into its components
    #[inline]
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: Hash, B: Hash> PairKey<A, B> {
    /// Deterministic combined hash of both components.
    pub fn combined_hash(&self) -> u64 {
        component_hash(&self.first) ^ component_hash(&self.second).rotate_right(PAIR_HASH_ROTATION)
    }
}

fn component_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

impl<A: Hash, B: Hash> Hash for PairKey<A, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.combined_hash());
    }
}

impl<A, B> From<(A, B)> for PairKey<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self::of(first, second)
    }
}

impl<A, B> From<PairKey<A, B>> for (A, B) {
    fn from(key: PairKey<A, B>) -> Self {
        key.into_inner()
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for PairKey<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_structural_equality() {
        assert_eq!(PairKey::of("integer", 3), PairKey::of("integer", 3));
        assert_ne!(PairKey::of("integer", 3), PairKey::of("integer", 4));
        assert_ne!(PairKey::of("integer", 3), PairKey::of("rational", 3));
    }

    #[test]
    fn test_equal_keys_hash_equal() {
        let a = PairKey::of("rational", PairKey::of(2_usize, 3_usize));
        let b = PairKey::of("rational", PairKey::of(2_usize, 3_usize));
        assert_eq!(a.combined_hash(), b.combined_hash());
    }

    #[test]
    fn test_rotation_separates_symmetric_pairs() {
        // Without rotation every (n, n) pair would hash to zero.
        let hashes: HashSet<u64> = (0_u32..32).map(|n| PairKey::of(n, n).combined_hash()).collect();
        assert_eq!(hashes.len(), 32);
        assert!(hashes.iter().filter(|h| **h == 0).count() <= 1);
    }

    #[test]
    fn test_combined_hash_formula() {
        let key = PairKey::of(11_u64, 29_u64);
        let expected = component_hash(&11_u64) ^ component_hash(&29_u64).rotate_right(7);
        assert_eq!(key.combined_hash(), expected);
    }

    #[test]
    fn test_tuple_conversions() {
        let key: PairKey<&str, usize> = ("integer", 4).into();
        assert_eq!(*key.first(), "integer");
        assert_eq!(*key.second(), 4);
        let (kind, dim): (&str, usize) = key.into();
        assert_eq!((kind, dim), ("integer", 4));
    }

    #[test]
    fn test_display() {
        let key = PairKey::of("rational", PairKey::of(2, 3));
        assert_eq!(key.to_string(), "(rational, (2, 3))");
    }

    #[test]
    fn test_serde_shape() {
        let key = PairKey::of("integer".to_string(), 3_usize);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, r#"{"first":"integer","second":3}"#);
        let back: PairKey<String, usize> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
