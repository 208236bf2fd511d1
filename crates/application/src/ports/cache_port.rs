//! Cache port definition
//!
//! Defines the interface for the time-bounded response cache that fronts
//! idempotent provider reads (weather, forecast). Values are stored as raw
//! bytes; the typed extension trait handles serialization and the
//! get-or-fetch flow.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::GatewayError;

/// Cache port for storing and retrieving cached values
///
/// Implementations must be thread-safe. An entry is valid until the TTL it
/// was stored with elapses; an expired entry behaves exactly like a missing
/// one.
#[async_trait]
pub trait CachePort: Send + Sync + std::fmt::Debug {
    /// Get a cached value by key
    ///
    /// Returns `None` if the key doesn't exist or its TTL has lapsed.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, GatewayError>;

    /// Set a cached value with a time-to-live
    ///
    /// If the key already exists, its value and TTL are replaced whole.
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), GatewayError>;

    /// Invalidate (delete) a single cache entry
    async fn invalidate(&self, key: &str) -> Result<(), GatewayError>;

    /// Invalidate all cache entries matching a prefix pattern
    ///
    /// A trailing `*` is stripped, so `weather:*` removes every key starting
    /// with `weather:` and `*` alone empties the cache. Returns the number of
    /// entries removed.
    async fn invalidate_pattern(&self, pattern: &str) -> Result<u64, GatewayError>;

    /// Get cache statistics (hits, misses, size)
    fn stats(&self) -> CacheStats;
}

/// Extension trait for typed cache operations
///
/// Provides typed get/set and the get-or-fetch flow on top of the raw byte
/// interface.
#[async_trait]
pub trait CachePortExt: CachePort {
    /// Get a typed value from cache
    async fn get<T>(&self, key: &str) -> Result<Option<T>, GatewayError>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        match self.get_bytes(key).await? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes).map_err(|e| {
                    GatewayError::Internal(format!("Cache deserialization error: {e}"))
                })?;
                Ok(Some(value))
            },
            None => Ok(None),
        }
    }

    /// Set a typed value in cache
    async fn set<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), GatewayError>
    where
        T: serde::Serialize + Send + Sync,
    {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| GatewayError::Internal(format!("Cache serialization error: {e}")))?;
        self.set_bytes(key, bytes, ttl).await
    }

    /// Return the cached value for `key`, or fetch, store and return it
    ///
    /// A valid cached entry is returned without invoking `fetch`. On a miss
    /// the fetched value is stored under `key` with `ttl` and returned.
    /// Fetch failures propagate uncached: a failed fetch never creates or
    /// overwrites an entry.
    async fn get_or_fetch<T, F, Fut>(
        &self,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> Result<T, GatewayError>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, GatewayError>> + Send,
    {
        if let Some(hit) = self.get::<T>(key).await? {
            return Ok(hit);
        }
        let value = fetch().await?;
        self.set(key, &value, ttl).await?;
        Ok(value)
    }
}

// Blanket implementation for all CachePort implementors
impl<T: CachePort + ?Sized> CachePortExt for T {}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Current number of entries
    pub entries: u64,
}

impl CacheStats {
    /// Calculate the hit rate as a fraction (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Standard TTL values for this domain
pub mod ttl {
    use std::time::Duration;

    /// Weather and forecast responses (30 minutes)
    pub const WEATHER: Duration = Duration::from_secs(30 * 60);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Instant;

    /// Minimal in-memory CachePort for exercising the extension trait
    #[derive(Debug, Default)]
    struct MapCache {
        entries: Mutex<HashMap<String, (Vec<u8>, Instant, Duration)>>,
    }

    #[async_trait]
    impl CachePort for MapCache {
        async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, GatewayError> {
            let entries = self.entries.lock().expect("lock");
            Ok(entries.get(key).and_then(|(bytes, written_at, ttl)| {
                (written_at.elapsed() < *ttl).then(|| bytes.clone())
            }))
        }

        async fn set_bytes(
            &self,
            key: &str,
            value: Vec<u8>,
            ttl: Duration,
        ) -> Result<(), GatewayError> {
            self.entries
                .lock()
                .expect("lock")
                .insert(key.to_string(), (value, Instant::now(), ttl));
            Ok(())
        }

        async fn invalidate(&self, key: &str) -> Result<(), GatewayError> {
            self.entries.lock().expect("lock").remove(key);
            Ok(())
        }

        async fn invalidate_pattern(&self, pattern: &str) -> Result<u64, GatewayError> {
            let prefix = pattern.trim_end_matches('*');
            let mut entries = self.entries.lock().expect("lock");
            let before = entries.len();
            entries.retain(|k, _| !k.starts_with(prefix));
            Ok((before - entries.len()) as u64)
        }

        fn stats(&self) -> CacheStats {
            CacheStats::default()
        }
    }

    #[tokio::test]
    async fn get_or_fetch_fetches_on_miss_and_stores() {
        let cache = MapCache::default();

        let value = cache
            .get_or_fetch("k", Duration::from_secs(60), || async { Ok(7_i32) })
            .await
            .expect("fetch succeeds");
        assert_eq!(value, 7);

        let cached: Option<i32> = cache.get("k").await.expect("get succeeds");
        assert_eq!(cached, Some(7));
    }

    #[tokio::test]
    async fn get_or_fetch_skips_fetcher_on_hit() {
        let cache = MapCache::default();
        cache
            .set("k", &1_i32, Duration::from_secs(60))
            .await
            .expect("set succeeds");

        let value: i32 = cache
            .get_or_fetch("k", Duration::from_secs(60), || async {
                Err(GatewayError::Internal("fetcher must not run".into()))
            })
            .await
            .expect("served from cache");
        assert_eq!(value, 1);
    }

    #[tokio::test]
    async fn get_or_fetch_failure_leaves_no_entry() {
        let cache = MapCache::default();

        let result: Result<i32, _> = cache
            .get_or_fetch("k", Duration::from_secs(60), || async {
                Err(GatewayError::TransientNetwork("boom".into()))
            })
            .await;
        assert!(result.is_err());

        let cached: Option<i32> = cache.get("k").await.expect("get succeeds");
        assert!(cached.is_none());
    }

    #[tokio::test]
    async fn expired_entry_behaves_like_a_miss() {
        let cache = MapCache::default();
        cache
            .set("k", &1_i32, Duration::from_millis(10))
            .await
            .expect("set succeeds");

        tokio::time::sleep(Duration::from_millis(20)).await;

        let value = cache
            .get_or_fetch("k", Duration::from_secs(60), || async { Ok(2_i32) })
            .await
            .expect("refetched");
        assert_eq!(value, 2);
    }

    #[test]
    fn hit_rate_zero_when_empty() {
        let stats = CacheStats::default();
        assert!(stats.hit_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn hit_rate_calculates_correctly() {
        let stats = CacheStats {
            hits: 75,
            misses: 25,
            entries: 100,
        };
        assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn weather_ttl_is_thirty_minutes() {
        assert_eq!(ttl::WEATHER, Duration::from_secs(1800));
    }
}
