//! Weak, self-cleaning flyweight caches
//!
//! This module provides the cache that backs every canonical space: values
//! are held weakly, dead slots are swept opportunistically, and concurrent
//! insertions converge on a single winner.

mod config;
mod stats;
pub mod weak;

// Re-exports for convenience
pub use config::{CleanupPolicy, WeakCacheConfig};
pub use stats::WeakCacheStats;
pub use weak::WeakCache;

/// Trait for cache keys
pub trait CacheKey: std::hash::Hash + Eq + Clone + Send + Sync {}

// Implement CacheKey for common types
impl<T: std::hash::Hash + Eq + Clone + Send + Sync> CacheKey for T {}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn module_accessible() {
        let _config = WeakCacheConfig::default();
    }
}
