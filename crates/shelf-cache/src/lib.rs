//! Type-safe TTL cache for the Shelf storefront.
//!
//! Values are JSON-encoded on the way in and decoded on the way out. The
//! cache is an ordinary value: build one with [`MemoryCache::new`], wrap it
//! in an `Arc` and hand it to whatever needs it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use shelf_cache::{cache_key, MemoryCache, DEFAULT_TTL};
//!
//! let cache = Arc::new(MemoryCache::new(DEFAULT_TTL));
//!
//! let key = cache_key!("category-products", 4);
//! cache.set(&key, &vec!["Mice", "Keyboards"])?;
//!
//! let groups: Option<Vec<String>> = cache.get(&key)?;
//! assert_eq!(groups.map(|g| g.len()), Some(2));
//!
//! assert!(cache.delete(&key));
//! # Ok::<(), shelf_cache::CacheError>(())
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::{MemoryCache, DEFAULT_TTL};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{cache_key, CacheError, MemoryCache, DEFAULT_TTL};
}
