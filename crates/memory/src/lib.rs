//! # lattice-memory
//!
//! Caching and memoization primitives shared by every parameterized
//! structure in the lattice workspace.
//!
//! This crate provides:
//! - [`PairKey`]: an immutable two-field structural key with a rotated,
//!   combined hash
//! - [`WeakCache`]: a concurrent map from keys to weakly held values that
//!   drops reclaimed slots on its own and resolves insertion races to a
//!   single canonical value
//! - [`LazyMemoCell`]: a single-assignment, compare-and-swap published slot
//!   for derived values
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use lattice_memory::prelude::*;
//!
//! let cache: WeakCache<PairKey<&'static str, usize>, String> = WeakCache::new();
//! let key = PairKey::of("rational", 2);
//!
//! let space = Arc::new(String::from("Q^2"));
//! assert!(cache.put_if_absent(key.clone(), Arc::clone(&space)).is_none());
//!
//! // A racing candidate loses and receives the winner.
//! let loser = Arc::new(String::from("Q^2"));
//! let winner = cache.put_if_absent(key.clone(), loser).unwrap();
//! assert!(Arc::ptr_eq(&winner, &space));
//!
//! // Once every strong handle is gone the slot is logically absent.
//! drop((space, winner));
//! assert!(cache.get(&key).is_none());
//!
//! let memo = LazyMemoCell::new();
//! assert_eq!(*memo.get_or_compute(|| 6 * 7), 42);
//! assert_eq!(*memo.get_or_compute(|| 0), 42);
//! ```
//!
//! ## Features
//!
//! - `logging` (default): emit `tracing` events for cleanup passes and
//!   lost insertion races

#![warn(rust_2018_idioms)]

// Error types
pub mod error;

// Core modules
pub mod cache;
pub mod key;
pub mod memo;

pub use crate::cache::{CleanupPolicy, WeakCache, WeakCacheConfig, WeakCacheStats};
pub use crate::error::{MemoryError, MemoryResult, Result};
pub use crate::key::PairKey;
pub use crate::memo::LazyMemoCell;

pub mod prelude {
    //! Convenient re-exports of commonly used types and traits.

    pub use crate::cache::{CacheKey, CleanupPolicy, WeakCache, WeakCacheConfig, WeakCacheStats};
    pub use crate::error::{MemoryError, MemoryResult};
    pub use crate::key::PairKey;
    pub use crate::memo::LazyMemoCell;
}
