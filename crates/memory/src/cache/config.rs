//! Configuration for weak caches

use crate::error::{MemoryError, MemoryResult};

/// When dead slots are swept from the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPolicy {
    /// Sweep the whole map before every lookup and insertion
    #[default]
    EveryOperation,
    /// Sweep before every lookup. Inserts sweep only after replacing or
    /// skipping a reclaimed slot, or once the map has doubled since the
    /// last sweep.
    OnDeadSlot,
}

/// Configuration for [`WeakCache`](super::WeakCache)
#[derive(Debug, Clone, Default)]
pub struct WeakCacheConfig {
    /// Initial capacity hint
    pub initial_capacity: Option<usize>,
    /// Number of map shards (power of two, greater than one)
    pub shard_amount: Option<usize>,
    /// Sweep strategy for reclaimed slots
    pub cleanup: CleanupPolicy,
    /// Whether to track cache metrics
    pub track_metrics: bool,
}

impl WeakCacheConfig {
    /// Create a new cache configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial capacity hint
    #[must_use = "builder methods must be chained or built"]
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Set the number of shards
    #[must_use = "builder methods must be chained or built"]
    pub fn with_shard_amount(mut self, shards: usize) -> Self {
        self.shard_amount = Some(shards);
        self
    }

    /// Set the cleanup policy
    #[must_use = "builder methods must be chained or built"]
    pub fn with_cleanup(mut self, cleanup: CleanupPolicy) -> Self {
        self.cleanup = cleanup;
        self
    }

    /// Enable metrics tracking
    #[must_use = "builder methods must be chained or built"]
    pub fn with_metrics(mut self) -> Self {
        self.track_metrics = true;
        self
    }

    /// Preset for the process-wide space registry: few keys, read-mostly
    #[must_use]
    pub fn for_space_registry() -> Self {
        Self::new().with_initial_capacity(64).with_metrics()
    }

    /// Preset for caches that churn through many short-lived keys
    #[must_use]
    pub fn for_high_churn() -> Self {
        Self::new()
            .with_initial_capacity(1024)
            .with_cleanup(CleanupPolicy::OnDeadSlot)
    }

    /// Validate the configuration
    pub fn validate(&self) -> MemoryResult<()> {
        if self.initial_capacity == Some(0) {
            return Err(MemoryError::invalid_cache_config(
                "initial capacity must be non-zero when given",
            ));
        }

        if let Some(shards) = self.shard_amount
            && (shards < 2 || !shards.is_power_of_two())
        {
            return Err(MemoryError::invalid_cache_config(
                "shard amount must be a power of two greater than one",
            ));
        }

        Ok(())
    }
}
