//! Cache implementations
//!
//! Provides the caching adapter for the application layer:
//! - `MokaCache`: in-memory cache with per-entry TTL, backing the weather
//!   response cache

mod moka_cache;

pub use moka_cache::{MokaCache, MokaCacheConfig};
