//! Lock-free memoization cell
//!
//! [`LazyMemoCell`] caches a derived value (a negation, a hash code, a
//! rendered string) inside the object it was derived from. The first
//! successful compare-and-swap wins; every caller, on every thread, gets the
//! winning `Arc` back and never a discarded candidate.
//!
//! No lock is taken. Two threads that miss at the same time may both run
//! the computation, but only one result is ever published.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

/// Single-assignment slot for a derived value.
pub struct LazyMemoCell<T> {
    slot: ArcSwapOption<T>,
}

impl<T> LazyMemoCell<T> {
    /// Create an unbound cell
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: ArcSwapOption::empty(),
        }
    }

    /// Create a cell that is already bound to `value`.
    ///
    /// Used when the value is known before the owner is published, so the
    /// binding is visible to every thread that can see the owner.
    #[must_use]
    pub fn bound(value: T) -> Self {
        Self::bound_arc(Arc::new(value))
    }

    /// Create a cell already bound to a shared value
    #[must_use]
    pub fn bound_arc(value: Arc<T>) -> Self {
        Self {
            slot: ArcSwapOption::new(Some(value)),
        }
    }

    /// The bound value, if any
    #[inline]
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.load_full()
    }

    /// Whether a value has been published
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.slot.load().is_some()
    }

    /// Return the bound value, computing and publishing it on first use.
    ///
    /// `compute` runs at most once per caller and only while the cell is
    /// unbound. If another thread binds first, the local candidate is dropped
    /// and the winner is returned; `compute` is never retried.
    pub fn get_or_compute<F>(&self, compute: F) -> Arc<T>
    where
        F: FnOnce() -> T,
    {
        if let Some(bound) = self.slot.load_full() {
            return bound;
        }
        self.publish(Arc::new(compute()))
    }

    /// Fallible variant of [`get_or_compute`](Self::get_or_compute).
    ///
    /// On error the cell stays unbound and the error is handed back, so a
    /// later caller may try again.
    pub fn try_get_or_compute<F, E>(&self, compute: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(bound) = self.slot.load_full() {
            return Ok(bound);
        }
        let candidate = compute()?;
        Ok(self.publish(Arc::new(candidate)))
    }

    /// Bind `candidate` if the cell is still empty, then return whatever the
    /// cell holds.
    ///
    /// Exposed so owners can pre-build a candidate (e.g. wire up a related
    /// object) before racing it in.
    pub fn publish(&self, candidate: Arc<T>) -> Arc<T> {
        let previous = self
            .slot
            .compare_and_swap(&None::<Arc<T>>, Some(Arc::clone(&candidate)));
        match &*previous {
            Some(winner) => Arc::clone(winner),
            // The swap went through: the candidate is now the bound value.
            None => candidate,
        }
    }
}

impl<T> Default for LazyMemoCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyMemoCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => f.debug_tuple("LazyMemoCell").field(&value).finish(),
            None => f.write_str("LazyMemoCell(<unbound>)"),
        }
    }
}
