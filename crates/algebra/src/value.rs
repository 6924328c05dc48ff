//! Coefficient storage shared between a value and its negation
//!
//! A stored value and its additive inverse share one [`ValueNode`] with two
//! polarity slots. Each slot memoizes its coefficients, hash code and
//! rendering. A handle is the node plus a polarity, so negating twice lands
//! on the very same slot and allocation without any reference cycle.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use lattice_memory::LazyMemoCell;
use rustc_hash::FxHasher;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    const fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Positive => 0,
            Self::Negative => 1,
        }
    }
}

/// Memoized state of one polarity
struct PolaritySlot<C> {
    coefficients: LazyMemoCell<Box<[C]>>,
    hash_code: LazyMemoCell<u64>,
    rendering: LazyMemoCell<String>,
}

impl<C> PolaritySlot<C> {
    fn unbound() -> Self {
        Self {
            coefficients: LazyMemoCell::new(),
            hash_code: LazyMemoCell::new(),
            rendering: LazyMemoCell::new(),
        }
    }

    fn bound(coefficients: Arc<Box<[C]>>) -> Self {
        Self {
            coefficients: LazyMemoCell::bound_arc(coefficients),
            ..Self::unbound()
        }
    }
}

struct ValueNode<C> {
    slots: [PolaritySlot<C>; 2],
}

impl<C> ValueNode<C> {
    fn slot(&self, polarity: Polarity) -> &PolaritySlot<C> {
        &self.slots[polarity.index()]
    }
}

/// Handle to one polarity of a shared value node
pub(crate) struct Coefficients<C> {
    node: Arc<ValueNode<C>>,
    polarity: Polarity,
    data: Arc<Box<[C]>>,
}

impl<C> Coefficients<C> {
    /// Store freshly validated coefficients
    pub(crate) fn new(data: Box<[C]>) -> Self {
        let data = Arc::new(data);
        let node = ValueNode {
            slots: [PolaritySlot::bound(Arc::clone(&data)), PolaritySlot::unbound()],
        };
        Self {
            node: Arc::new(node),
            polarity: Polarity::Positive,
            data,
        }
    }

    pub(crate) fn as_slice(&self) -> &[C] {
        &self.data
    }

    /// Handle to the opposite polarity, computing its coefficients at most
    /// once per node no matter how many threads ask
    pub(crate) fn negated(&self, negate: impl Fn(&C) -> C) -> Self {
        let flipped = self.polarity.flipped();
        let data = self
            .node
            .slot(flipped)
            .coefficients
            .get_or_compute(|| self.data.iter().map(negate).collect());
        Self {
            node: Arc::clone(&self.node),
            polarity: flipped,
            data,
        }
    }

    /// Whether the opposite polarity has already been materialised
    pub(crate) fn is_negation_bound(&self) -> bool {
        self.node.slot(self.polarity.flipped()).coefficients.is_bound()
    }

    /// Same node, same polarity
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node) && self.polarity == other.polarity
    }

    /// Memoized rendering of this polarity
    pub(crate) fn rendering(&self, render: impl FnOnce(&[C]) -> String) -> Arc<String> {
        self.node
            .slot(self.polarity)
            .rendering
            .get_or_compute(|| render(&self.data))
    }
}

impl<C: Hash> Coefficients<C> {
    /// Memoized hash of `seed` followed by the coefficients
    pub(crate) fn hash_code(&self, seed: &impl Hash) -> u64 {
        *self.node.slot(self.polarity).hash_code.get_or_compute(|| {
            let mut hasher = FxHasher::default();
            seed.hash(&mut hasher);
            self.data.hash(&mut hasher);
            hasher.finish()
        })
    }
}

impl<C> Clone for Coefficients<C> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
            polarity: self.polarity,
            data: Arc::clone(&self.data),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for Coefficients<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coefficients")
            .field("polarity", &self.polarity)
            .field("data", &self.as_slice())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn stored(values: &[i64]) -> Coefficients<i64> {
        Coefficients::new(values.to_vec().into_boxed_slice())
    }

    #[test]
    fn test_double_negation_returns_same_slot() {
        let x = stored(&[1, -2, 3]);
        let negated = x.negated(|c| -c);
        assert_eq!(negated.as_slice(), &[-1, 2, -3]);
        assert!(!negated.ptr_eq(&x));

        let back = negated.negated(|_| unreachable!("positive slot is always bound"));
        assert!(back.ptr_eq(&x));
        assert_eq!(back.as_slice().as_ptr(), x.as_slice().as_ptr());
    }

    #[test]
    fn test_negation_computed_once() {
        let x = stored(&[4, 5]);
        let calls = AtomicUsize::new(0);
        let negate = |c: &i64| {
            calls.fetch_add(1, Ordering::SeqCst);
            -c
        };

        assert!(!x.is_negation_bound());
        let first = x.negated(negate);
        let second = x.negated(negate);
        assert!(x.is_negation_bound());
        assert!(first.ptr_eq(&second));
        assert_eq!(first.as_slice().as_ptr(), second.as_slice().as_ptr());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_hash_code_is_memoized_per_polarity() {
        let x = stored(&[1, 2]);
        let negated = x.negated(|c| -c);
        assert_eq!(x.hash_code(&"space"), x.hash_code(&"space"));
        assert_ne!(x.hash_code(&"space"), negated.hash_code(&"space"));
        assert_eq!(x.hash_code(&"space"), stored(&[1, 2]).hash_code(&"space"));
    }

    #[test]
    fn test_rendering_is_memoized() {
        let x = stored(&[7]);
        let first = x.rendering(|data| format!("{data:?}"));
        let second = x.rendering(|_| unreachable!("rendering already bound"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.as_str(), "[7]");
    }
}
