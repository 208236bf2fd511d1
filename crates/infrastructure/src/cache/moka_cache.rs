//! Moka in-memory cache implementation
//!
//! Thread-safe in-memory cache implementing the application's `CachePort`.
//! Each entry carries its own expiry stamped at write time and checked on
//! read, so callers get exact per-entry TTL semantics; moka's byte-weighted
//! capacity bounds memory underneath.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use application::{
    error::GatewayError,
    ports::{CachePort, CacheStats},
};
use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, instrument};

/// Maximum cache size in MB
const DEFAULT_MAX_CAPACITY_MB: u64 = 16;

/// Configuration for the Moka cache
#[derive(Debug, Clone, Copy)]
pub struct MokaCacheConfig {
    /// Maximum capacity in megabytes
    pub max_capacity_mb: u64,
    /// Eviction backstop for entries whose per-entry TTL never gets read
    pub backstop_ttl: Duration,
}

impl Default for MokaCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity_mb: DEFAULT_MAX_CAPACITY_MB,
            backstop_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

/// One stored value with its expiry (epoch milliseconds)
#[derive(Debug, Clone)]
struct CacheEntry {
    data: Vec<u8>,
    expires_at_millis: u64,
}

/// Moka-based in-memory cache with per-entry TTL
pub struct MokaCache {
    cache: Cache<String, CacheEntry>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl std::fmt::Debug for MokaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCache")
            .field("entries", &self.cache.entry_count())
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish()
    }
}

impl MokaCache {
    /// Create a new cache with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MokaCacheConfig::default())
    }

    /// Create a new cache with custom configuration
    #[must_use]
    pub fn with_config(config: MokaCacheConfig) -> Self {
        let max_capacity_bytes = config.max_capacity_mb * 1024 * 1024;

        let cache = Cache::builder()
            .max_capacity(max_capacity_bytes)
            .time_to_live(config.backstop_ttl)
            .weigher(|_key: &String, entry: &CacheEntry| -> u32 {
                entry.data.len().try_into().unwrap_or(u32::MAX)
            })
            .build();

        Self {
            cache,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Current Unix timestamp in milliseconds
    fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0)
    }

    /// Whether an entry's per-entry TTL has lapsed
    fn is_expired(entry: &CacheEntry) -> bool {
        Self::now_millis() >= entry.expires_at_millis
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CachePort for MokaCache {
    #[instrument(skip(self), level = "debug")]
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, GatewayError> {
        match self.cache.get(key).await {
            Some(entry) if !Self::is_expired(&entry) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache hit");
                Ok(Some(entry.data))
            },
            Some(_) => {
                // Lapsed entry behaves like a miss and is dropped eagerly.
                self.cache.invalidate(key).await;
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache entry expired");
                Ok(None)
            },
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, "Cache miss");
                Ok(None)
            },
        }
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), GatewayError> {
        let ttl_millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        let entry = CacheEntry {
            data: value,
            expires_at_millis: Self::now_millis().saturating_add(ttl_millis),
        };
        self.cache.insert(key.to_string(), entry).await;
        debug!(key = %key, ttl_ms = ttl_millis, "Cache set");
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn invalidate(&self, key: &str) -> Result<(), GatewayError> {
        self.cache.invalidate(key).await;
        debug!(key = %key, "Cache invalidated");
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn invalidate_pattern(&self, pattern: &str) -> Result<u64, GatewayError> {
        // Moka has no pattern invalidation; iterate and match prefixes.
        let prefix = pattern.trim_end_matches('*');
        let mut count = 0u64;

        // Run pending maintenance tasks before iteration
        self.cache.run_pending_tasks().await;

        // Collect keys to invalidate (can't modify while iterating)
        let keys_to_remove: Vec<String> = self
            .cache
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| (*k).clone())
            .collect();

        for key in keys_to_remove {
            self.cache.invalidate(&key).await;
            count += 1;
        }

        debug!(pattern = %pattern, count = count, "Pattern invalidation complete");
        Ok(count)
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
        }
    }
}
