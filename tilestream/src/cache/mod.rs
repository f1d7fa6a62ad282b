//! Tile cache preceding network fetches.
//!
//! Every batch fetch consults the cache before touching the network; a hit
//! is counted separately from a download in the batch summary. The
//! interface is a minimal key-value trait so backends can vary:
//!
//! - **String keys**: tile URLs, human-readable in logs
//! - **`Vec<u8>` values**: raw encoded tile bytes, no image opinions
//! - **Dyn-compatible**: boxed futures so `Arc<dyn TileCache>` works

mod memory;

pub use memory::MemoryTileCache;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Backend-specific failure.
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Generic tile cache interface.
///
/// All implementations must be `Send + Sync` for use across async tasks.
pub trait TileCache: Send + Sync {
    /// Store a tile under the given key.
    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>>;

    /// Fetch a tile by key; `None` on a miss.
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>>;

    /// Whether the key is currently cached.
    fn contains(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>>;

    /// Current total size of cached values in bytes.
    fn size_bytes(&self) -> u64;

    /// Number of cached entries.
    fn entry_count(&self) -> u64;
}
