//! In-memory key-value store with per-entry expiry and JSON encoding.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, Instant};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, trace};

use crate::CacheError;

/// Default time-to-live: fifteen minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug)]
struct Entry {
    bytes: Vec<u8>,
    /// `None` when the TTL overflows the clock; such entries never expire.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Type-safe TTL cache held in process memory.
///
/// Values are stored JSON-encoded, so anything that implements `Serialize`
/// and `DeserializeOwned` can be cached. Construct one per process (or per
/// test) and share it by `Arc`; there is no global instance.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use shelf_cache::MemoryCache;
///
/// let cache = MemoryCache::new(Duration::from_secs(60));
/// cache.set("brand-products:7", &vec![1, 2, 3])?;
///
/// let ids: Option<Vec<i32>> = cache.get("brand-products:7")?;
/// assert_eq!(ids, Some(vec![1, 2, 3]));
/// # Ok::<(), shelf_cache::CacheError>(())
/// ```
#[derive(Debug)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
    default_ttl: Duration,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl MemoryCache {
    /// Create an empty cache whose entries live for `default_ttl`.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    /// TTL applied by [`MemoryCache::set`].
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired. Expired
    /// entries are removed on the way out.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let now = Instant::now();
        {
            let entries = self.read();
            match entries.get(key) {
                None => {
                    trace!(key, "cache miss");
                    return Ok(None);
                }
                Some(entry) if !entry.is_expired(now) => {
                    trace!(key, "cache hit");
                    return Ok(Some(serde_json::from_slice(&entry.bytes)?));
                }
                Some(_) => {}
            }
        }

        let mut entries = self.write();
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            debug!(key, "cache entry expired");
        }
        Ok(None)
    }

    /// Store a value with the default TTL.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        self.set_with_ttl(key, value, self.default_ttl)
    }

    /// Store a value with an explicit TTL. A zero TTL stores an already expired entry.
    pub fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        let entry = Entry {
            bytes,
            expires_at: Instant::now().checked_add(ttl),
        };

        self.write().insert(key.to_string(), entry);
        trace!(key, ttl_ms = ttl.as_millis() as u64, "cache set");
        Ok(())
    }

    /// Delete a value. Returns whether the key was present.
    pub fn delete(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    /// Check if a live entry exists for the key.
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.read()
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    /// Keys of all live entries, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.read()
            .iter()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.read()
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "purged expired cache entries");
        }
        removed
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.write().clear();
    }

    // A panic while holding the lock cannot leave a half-written entry
    // behind, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Entry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Entry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// use shelf_cache::cache_key;
///
/// let key = cache_key!("brand-products", 7);
/// assert_eq!(key, "brand-products:7");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
