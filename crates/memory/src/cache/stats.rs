//! Cache statistics

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time snapshot of weak cache activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeakCacheStats {
    /// Lookups that found a live value
    pub hits: u64,
    /// Lookups that found nothing or a reclaimed slot
    pub misses: u64,
    /// Successful `put_if_absent` insertions
    pub insertions: u64,
    /// Unconditional `put` replacements
    pub replacements: u64,
    /// `put_if_absent` candidates that lost to a live value
    pub races_lost: u64,
    /// Dead slots removed by cleanup passes
    pub reclaimed: u64,
}

impl WeakCacheStats {
    /// Calculate the hit rate (0.0-1.0)
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Get total number of lookups
    #[must_use]
    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }
}

/// Atomic counters behind [`WeakCacheStats`]
#[derive(Debug, Default)]
pub(crate) struct AtomicCacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    insertions: AtomicU64,
    replacements: AtomicU64,
    races_lost: AtomicU64,
    reclaimed: AtomicU64,
}

impl AtomicCacheStats {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insertion(&self) {
        self.insertions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_replacement(&self) {
        self.replacements.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_race_lost(&self) {
        self.races_lost.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reclaimed(&self, count: usize) {
        self.reclaimed.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> WeakCacheStats {
        WeakCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            insertions: self.insertions.load(Ordering::Relaxed),
            replacements: self.replacements.load(Ordering::Relaxed),
            races_lost: self.races_lost.load(Ordering::Relaxed),
            reclaimed: self.reclaimed.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        for counter in [
            &self.hits,
            &self.misses,
            &self.insertions,
            &self.replacements,
            &self.races_lost,
            &self.reclaimed,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let stats = WeakCacheStats {
            hits: 3,
            misses: 1,
            ..WeakCacheStats::default()
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
        assert_eq!(stats.total_lookups(), 4);
        assert!(WeakCacheStats::default().hit_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn test_counters_snapshot_and_reset() {
        let counters = AtomicCacheStats::default();
        counters.record_hit();
        counters.record_miss();
        counters.record_insertion();
        counters.record_race_lost();
        counters.record_reclaimed(4);

        let snapshot = counters.snapshot();
        assert_eq!(snapshot.hits, 1);
        assert_eq!(snapshot.reclaimed, 4);
        assert_eq!(snapshot.races_lost, 1);

        counters.reset();
        assert_eq!(counters.snapshot(), WeakCacheStats::default());
    }
}
