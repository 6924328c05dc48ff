//! Concurrent weak-value cache using `DashMap`
//!
//! Each slot maps a key to a [`Weak`] handle. The cache never keeps a value
//! alive by itself: once the last strong handle outside the cache is dropped
//! the slot is logically absent, and the next cleanup pass removes it
//! physically.
//!
//! # Race resolution
//!
//! [`WeakCache::put_if_absent`] inserts only into a vacant slot. A slot that
//! still exists but whose value was reclaimed blocks the insert, so the
//! cache sweeps dead slots and retries. The loop ends either with the
//! candidate inserted or with a live competitor handed back to the caller.
//! Every retry is caused by a dead slot that the sweep removes, so some
//! thread always makes progress.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

use super::CacheKey;
use super::config::{CleanupPolicy, WeakCacheConfig};
use super::stats::{AtomicCacheStats, WeakCacheStats};
use crate::error::MemoryResult;

/// Physical slot count that triggers an insert-side sweep under
/// [`CleanupPolicy::OnDeadSlot`] when the map was last seen nearly empty
const MIN_SWEEP_WATERMARK: usize = 64;

/// A concurrent map from keys to weakly held values.
///
/// `V` may be unsized, e.g. `dyn Any + Send + Sync` for heterogeneous
/// flyweights sharing one cache.
///
/// # Trade-offs:
/// - No size bound and no eviction policy: residency is decided solely by
///   whether someone outside the cache still holds the value
/// - Cleanup is opportunistic and runs on the caller's thread, never in the
///   background
/// - Map shards are locked only for the duration of a single slot access or
///   sweep step; no lock is ever held across two operations
pub struct WeakCache<K, V>
where
    K: CacheKey,
    V: ?Sized,
{
    /// Sharded concurrent map of weak slots
    entries: Arc<DashMap<K, Weak<V>>>,
    /// Cache configuration
    config: WeakCacheConfig,
    /// Activity counters
    stats: Arc<AtomicCacheStats>,
    /// Slot count at which inserts sweep under `OnDeadSlot`; twice the
    /// surviving slot count after the last sweep
    sweep_watermark: Arc<AtomicUsize>,
}

impl<K, V> WeakCache<K, V>
where
    K: CacheKey,
    V: ?Sized,
{
    /// Create an empty cache with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::build(WeakCacheConfig::default())
    }

    /// Create an empty cache with the given configuration
    pub fn with_config(config: WeakCacheConfig) -> MemoryResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: WeakCacheConfig) -> Self {
        let capacity = config.initial_capacity.unwrap_or(0);
        let entries = match config.shard_amount {
            Some(shards) => DashMap::with_capacity_and_shard_amount(capacity, shards),
            None => DashMap::with_capacity(capacity),
        };

        Self {
            entries: Arc::new(entries),
            config,
            stats: Arc::new(AtomicCacheStats::default()),
            sweep_watermark: Arc::new(AtomicUsize::new(MIN_SWEEP_WATERMARK)),
        }
    }

    /// Live value for `key`, if any.
    ///
    /// A slot whose value has been reclaimed is reported as absent.
    /// Every lookup sweeps dead slots first, whatever the cleanup policy.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.cleanup();

        match self.entries.get(key).and_then(|slot| slot.upgrade()) {
            Some(live) => {
                self.on_hit();
                Some(live)
            }
            None => {
                self.on_miss();
                None
            }
        }
    }

    /// Unconditionally point `key` at `value`.
    ///
    /// Returns the value that was live in the slot before, if any.
    pub fn put(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.sweep_before_insert();

        let replaced = self.entries.insert(key, Arc::downgrade(&value));
        let previous = replaced.as_ref().and_then(Weak::upgrade);

        if self.config.track_metrics {
            self.stats.record_replacement();
        }
        if replaced.is_some() && previous.is_none() {
            self.sweep_after_dead_slot();
        }
        previous
    }

    /// Insert `value` only if no live value exists for `key`.
    ///
    /// Returns `None` when `value` became the cached value, or `Some(winner)`
    /// when another live value already holds the slot. In the latter case
    /// `value` is the loser and callers should use the winner instead.
    pub fn put_if_absent(&self, key: K, value: Arc<V>) -> Option<Arc<V>> {
        self.sweep_before_insert();

        loop {
            match self.entries.entry(key.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(Arc::downgrade(&value));
                    if self.config.track_metrics {
                        self.stats.record_insertion();
                    }
                    return None;
                }
                Entry::Occupied(slot) => {
                    if let Some(live) = slot.get().upgrade() {
                        if self.config.track_metrics {
                            self.stats.record_race_lost();
                        }
                        #[cfg(feature = "logging")]
                        debug!("weak cache insert lost to a live value");
                        return Some(live);
                    }
                }
            }
            // The slot exists but its value is gone. The entry guard has been
            // released above, so sweeping here cannot deadlock on the shard.
            self.cleanup();
        }
    }

    /// Return the live value for `key`, building and racing in a new one on
    /// a miss.
    ///
    /// `make` may run even if another thread wins the race; its result is then
    /// dropped and the winner is returned.
    pub fn get_or_insert_with<F>(&self, key: K, make: F) -> Arc<V>
    where
        F: FnOnce() -> Arc<V>,
    {
        if let Some(live) = self.get(&key) {
            return live;
        }

        let candidate = make();
        match self.put_if_absent(key, Arc::clone(&candidate)) {
            Some(winner) => winner,
            None => candidate,
        }
    }

    /// Remove the slot for `key`, returning its value if it was still live
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        self.entries
            .remove(key)
            .and_then(|(_, slot)| slot.upgrade())
    }

    /// Whether a live value exists for `key`
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries
            .get(key)
            .is_some_and(|slot| slot.strong_count() > 0)
    }

    /// Number of physical slots, including dead ones not yet swept
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of slots whose value is still live
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.entries
            .iter()
            .filter(|slot| slot.value().strong_count() > 0)
            .count()
    }

    /// Whether the cache has no physical slots
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every slot
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Remove every slot whose value has been reclaimed.
    ///
    /// Returns the number of slots removed. Live slots are never touched, so
    /// this is safe to run while other threads read or insert.
    pub fn cleanup(&self) -> usize {
        let mut reclaimed = 0_usize;
        self.entries.retain(|_, slot| {
            let live = slot.strong_count() > 0;
            if !live {
                reclaimed += 1;
            }
            live
        });
        self.sweep_watermark.store(
            (self.entries.len() * 2).max(MIN_SWEEP_WATERMARK),
            Ordering::Relaxed,
        );

        if reclaimed > 0 {
            if self.config.track_metrics {
                self.stats.record_reclaimed(reclaimed);
            }
            #[cfg(feature = "logging")]
            trace!(reclaimed, "weak cache swept dead slots");
        }
        reclaimed
    }

    /// Snapshot of cache activity (all zeros unless metrics are tracked)
    #[must_use]
    pub fn stats(&self) -> WeakCacheStats {
        self.stats.snapshot()
    }

    /// Reset activity counters
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Cache configuration
    #[must_use]
    pub fn config(&self) -> &WeakCacheConfig {
        &self.config
    }

    fn sweep_before_insert(&self) {
        let due = match self.config.cleanup {
            CleanupPolicy::EveryOperation => true,
            CleanupPolicy::OnDeadSlot => {
                self.entries.len() >= self.sweep_watermark.load(Ordering::Relaxed)
            }
        };
        if due {
            self.cleanup();
        }
    }

    fn sweep_after_dead_slot(&self) {
        if self.config.cleanup == CleanupPolicy::OnDeadSlot {
            self.cleanup();
        }
    }

    fn on_hit(&self) {
        if self.config.track_metrics {
            self.stats.record_hit();
        }
    }

    fn on_miss(&self) {
        if self.config.track_metrics {
            self.stats.record_miss();
        }
    }
}

impl<K, V> Default for WeakCache<K, V>
where
    K: CacheKey,
    V: ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

// Implement Clone to share the cache across threads
impl<K, V> Clone for WeakCache<K, V>
where
    K: CacheKey,
    V: ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            config: self.config.clone(),
            stats: Arc::clone(&self.stats),
            sweep_watermark: Arc::clone(&self.sweep_watermark),
        }
    }
}

impl<K, V> std::fmt::Debug for WeakCache<K, V>
where
    K: CacheKey,
    V: ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakCache")
            .field("slots", &self.entries.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::PairKey;
    use std::any::Any;

    type SpaceKey = PairKey<&'static str, usize>;

    #[test]
    fn test_get_on_empty_cache() {
        let cache = WeakCache::<SpaceKey, String>::new();
        assert!(cache.get(&PairKey::of("integer", 2)).is_none());
    }

    #[test]
    fn test_put_if_absent_then_get() {
        let cache = WeakCache::<SpaceKey, String>::new();
        let key = PairKey::of("integer", 2);
        let value = Arc::new("Z^2".to_string());

        assert!(cache.put_if_absent(key, Arc::clone(&value)).is_none());
        let found = cache.get(&key).unwrap();
        assert!(Arc::ptr_eq(&found, &value));
    }

    #[test]
    fn test_put_if_absent_returns_live_winner() {
        let cache = WeakCache::<SpaceKey, String>::new();
        let key = PairKey::of("integer", 2);
        let winner = Arc::new("first".to_string());
        cache.put_if_absent(key, Arc::clone(&winner));

        let loser = Arc::new("second".to_string());
        let observed = cache.put_if_absent(key, loser).unwrap();
        assert!(Arc::ptr_eq(&observed, &winner));
    }

    #[test]
    fn test_reclaimed_value_is_absent_and_replaceable() {
        let cache = WeakCache::<SpaceKey, String>::with_config(
            WeakCacheConfig::new().with_cleanup(CleanupPolicy::OnDeadSlot),
        )
        .unwrap();
        let key = PairKey::of("rational", 3);

        let value = Arc::new("Q^3".to_string());
        cache.put_if_absent(key, Arc::clone(&value));
        drop(value);

        // The dead slot still physically exists until something sweeps it.
        assert_eq!(cache.len(), 1);
        assert!(!cache.contains_key(&key));

        let fresh = Arc::new("Q^3 again".to_string());
        assert!(cache.put_if_absent(key, Arc::clone(&fresh)).is_none());
        assert!(Arc::ptr_eq(&cache.get(&key).unwrap(), &fresh));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_returns_previous_live_value() {
        let cache = WeakCache::<SpaceKey, String>::new();
        let key = PairKey::of("integer", 1);
        let first = Arc::new("a".to_string());
        let second = Arc::new("b".to_string());

        assert!(cache.put(key, Arc::clone(&first)).is_none());
        let previous = cache.put(key, Arc::clone(&second)).unwrap();
        assert!(Arc::ptr_eq(&previous, &first));
        assert!(Arc::ptr_eq(&cache.get(&key).unwrap(), &second));
    }

    #[test]
    fn test_put_over_dead_slot_returns_none() {
        let cache = WeakCache::<SpaceKey, String>::with_config(
            WeakCacheConfig::new().with_cleanup(CleanupPolicy::OnDeadSlot),
        )
        .unwrap();
        let key = PairKey::of("integer", 1);
        cache.put(key, Arc::new("gone".to_string()));

        let replacement = Arc::new("here".to_string());
        assert!(cache.put(key, replacement).is_none());
    }

    #[test]
    fn test_cleanup_counts_dead_slots() {
        let cache = WeakCache::<SpaceKey, String>::with_config(
            WeakCacheConfig::new()
                .with_cleanup(CleanupPolicy::OnDeadSlot)
                .with_metrics(),
        )
        .unwrap();
        let keep = Arc::new("keep".to_string());
        cache.put_if_absent(PairKey::of("a", 1), Arc::clone(&keep));
        cache.put_if_absent(PairKey::of("b", 1), Arc::new("drop".to_string()));
        cache.put_if_absent(PairKey::of("c", 1), Arc::new("drop".to_string()));

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.live_len(), 1);
        assert_eq!(cache.cleanup(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats().reclaimed, 2);
    }

    #[test]
    fn test_every_operation_policy_sweeps_on_get() {
        let cache = WeakCache::<SpaceKey, String>::new();
        cache.put_if_absent(PairKey::of("a", 1), Arc::new("drop".to_string()));
        assert_eq!(cache.len(), 1);

        assert!(cache.get(&PairKey::of("b", 2)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_high_churn_inserts_stay_bounded() {
        let cache =
            WeakCache::<PairKey<&'static str, usize>, String>::with_config(
                WeakCacheConfig::for_high_churn(),
            )
            .unwrap();

        for round in 0..10_000 {
            cache.put_if_absent(PairKey::of("absent", round), Arc::new(round.to_string()));
            cache.put(PairKey::of("put", round), Arc::new(round.to_string()));
            assert!(cache.len() <= 2 * MIN_SWEEP_WATERMARK);
        }
        assert_eq!(cache.live_len(), 0);
    }

    #[test]
    fn test_high_churn_get_sweeps_before_lookup() {
        let cache =
            WeakCache::<PairKey<&'static str, usize>, String>::with_config(
                WeakCacheConfig::for_high_churn(),
            )
            .unwrap();

        for round in 0..1_000 {
            cache.put_if_absent(PairKey::of("absent", round), Arc::new(round.to_string()));
            cache.put(PairKey::of("put", round), Arc::new(round.to_string()));
            assert!(cache.get(&PairKey::of("missing", round)).is_none());
            assert_eq!(cache.len(), 0);
        }
    }

    #[test]
    fn test_put_over_dead_slot_sweeps_under_on_dead_slot() {
        let cache = WeakCache::<SpaceKey, String>::with_config(
            WeakCacheConfig::new().with_cleanup(CleanupPolicy::OnDeadSlot),
        )
        .unwrap();
        cache.put(PairKey::of("a", 1), Arc::new("gone".to_string()));
        cache.put(PairKey::of("b", 1), Arc::new("gone".to_string()));
        assert_eq!(cache.len(), 2);

        let keep = Arc::new("kept".to_string());
        assert!(cache.put(PairKey::of("a", 1), Arc::clone(&keep)).is_none());
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.live_len(), 1);
    }

    #[test]
    fn test_get_or_insert_with_builds_once_per_live_value() {
        let cache = WeakCache::<SpaceKey, String>::new();
        let key = PairKey::of("integer", 5);
        let first = cache.get_or_insert_with(key, || Arc::new("built".to_string()));
        let second = cache.get_or_insert_with(key, || Arc::new("rebuilt".to_string()));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, "built");
    }

    #[test]
    fn test_unsized_values() {
        let cache = WeakCache::<SpaceKey, dyn Any + Send + Sync>::new();
        let value: Arc<dyn Any + Send + Sync> = Arc::new(42_u32);
        cache.put_if_absent(PairKey::of("u32", 1), Arc::clone(&value));

        let found = cache.get(&PairKey::of("u32", 1)).unwrap();
        let typed = found.downcast::<u32>().unwrap();
        assert_eq!(*typed, 42);
    }

    #[test]
    fn test_remove() {
        let cache = WeakCache::<SpaceKey, String>::new();
        let key = PairKey::of("integer", 9);
        let value = Arc::new("v".to_string());
        cache.put(key, Arc::clone(&value));
        assert!(Arc::ptr_eq(&cache.remove(&key).unwrap(), &value));
        assert!(cache.get(&key).is_none());
    }

    #[test]
    fn test_stats_track_hits_misses_and_races() {
        let cache =
            WeakCache::<SpaceKey, String>::with_config(WeakCacheConfig::new().with_metrics())
                .unwrap();
        let key = PairKey::of("integer", 2);
        let value = Arc::new("v".to_string());

        assert!(cache.get(&key).is_none());
        cache.put_if_absent(key, Arc::clone(&value));
        cache.put_if_absent(key, Arc::new("w".to_string()));
        cache.get(&key);

        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.insertions, 1);
        assert_eq!(stats.races_lost, 1);

        cache.reset_stats();
        assert_eq!(cache.stats(), WeakCacheStats::default());
    }

    #[test]
    fn test_clone_shares_slots() {
        let cache = WeakCache::<SpaceKey, String>::new();
        let shared = cache.clone();
        let value = Arc::new("v".to_string());
        cache.put_if_absent(PairKey::of("a", 1), Arc::clone(&value));
        assert!(shared.get(&PairKey::of("a", 1)).is_some());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result =
            WeakCache::<SpaceKey, String>::with_config(WeakCacheConfig::new().with_shard_amount(3));
        assert!(result.is_err());
    }
}
