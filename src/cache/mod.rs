//! Key/value cache with runtime-selected backends.
//!
//! - Memory cache (in-process, bounded, per-entry expiry)
//! - Redis cache (shared between instances)
//!
//! ```toml
//! [cache]
//! backend = "memory"  # or "redis"
//!
//! [cache.memory]
//! max_size = 10000
//! ttl_seconds = 3600
//!
//! [cache.redis]
//! url = "redis://127.0.0.1:6379"
//! key_prefix = "storefront"
//! ```

mod error;
mod manager;
mod memory;
mod redis;
mod traits;

pub use error::CacheError;
pub use manager::CacheManager;
pub use memory::MemoryCache;
pub use traits::AppCache;
