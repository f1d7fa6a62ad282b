//! In-memory tile cache using moka.
//!
//! Wraps `moka::future::Cache` to provide an async-safe, lock-free
//! in-memory cache with automatic LRU eviction. Entries are weighed by
//! their byte size so the configured capacity bounds memory, not entry
//! count. Eviction is moka's own; there is no manual eviction policy here.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use super::{BoxFuture, CacheError, TileCache};

/// In-memory tile cache with size-based LRU eviction.
pub struct MemoryTileCache {
    cache: MokaCache<String, Vec<u8>>,
}

impl MemoryTileCache {
    /// Create a new memory cache.
    ///
    /// # Arguments
    ///
    /// * `max_size_bytes` - Maximum total size of cached tiles
    /// * `ttl` - Optional time-to-live for entries
    pub fn new(max_size_bytes: u64, ttl: Option<Duration>) -> Self {
        let mut builder = MokaCache::builder()
            // Weight each entry by its data size
            .weigher(|_key: &String, value: &Vec<u8>| -> u32 {
                value.len().min(u32::MAX as usize) as u32
            })
            .max_capacity(max_size_bytes);

        if let Some(ttl_duration) = ttl {
            builder = builder.time_to_live(ttl_duration);
        }

        Self {
            cache: builder.build(),
        }
    }
}

impl TileCache for MemoryTileCache {
    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>> {
        let key = key.to_string();
        Box::pin(async move {
            self.cache.insert(key, value).await;
            Ok(())
        })
    }

    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.get(&key).await) })
    }

    fn contains(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.contains_key(&key)) })
    }

    fn size_bytes(&self) -> u64 {
        self.cache.weighted_size()
    }

    fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}
