//! Cached loaders behind the listing and product routes.

use std::sync::Arc;
use std::time::Duration;

use http::header::{HeaderName, HeaderValue, CACHE_CONTROL};
use http::StatusCode;
use shelf_cache::MemoryCache;
use shelf_catalog::slug::trailing_id;
use shelf_catalog::{build_listing, ListingKind, ListingPayload, Product};
use tracing::{debug, info, warn};

use crate::config::CacheConfig;
use crate::source::ProductSource;

/// `Cache-Control` value sent with listing pages.
pub const LISTING_CACHE_CONTROL: &str = "max-age=900, stale-while-revalidate=60";

/// Result of loading a listing route.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The payload to render. Possibly the empty payload.
    Loaded(ListingPayload),
    /// The route parameter carried no id.
    Redirect { status: StatusCode, location: String },
}

impl LoadOutcome {
    pub fn payload(&self) -> Option<&ListingPayload> {
        match self {
            LoadOutcome::Loaded(payload) => Some(payload),
            LoadOutcome::Redirect { .. } => None,
        }
    }

    pub fn into_payload(self) -> Option<ListingPayload> {
        match self {
            LoadOutcome::Loaded(payload) => Some(payload),
            LoadOutcome::Redirect { .. } => None,
        }
    }
}

/// Loads listing payloads through a TTL cache.
///
/// Failures never surface to the caller: an unreachable source or an empty
/// result is served (and cached) as [`ListingPayload::empty`].
pub struct ListingLoader<S: ProductSource> {
    source: Arc<S>,
    cache: Arc<MemoryCache>,
    ttl: Duration,
    caching: bool,
}

impl<S: ProductSource> ListingLoader<S> {
    /// Create a loader that caches with the cache's default TTL.
    pub fn new(source: Arc<S>, cache: Arc<MemoryCache>) -> Self {
        let ttl = cache.default_ttl();
        Self {
            source,
            cache,
            ttl,
            caching: true,
        }
    }

    /// Apply TTL and on/off settings from config.
    pub fn with_config(mut self, config: &CacheConfig) -> Self {
        self.ttl = config.ttl();
        self.caching = config.enabled;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &MemoryCache {
        &self.cache
    }

    /// Cache key of a listing: `brand-products-{id}` or `category-products-{id}`.
    pub fn cache_key(kind: ListingKind, id: &str) -> String {
        format!("{}-products-{}", kind.as_str(), id)
    }

    /// The `Cache-Control` header of listing responses.
    pub fn cache_control() -> (HeaderName, HeaderValue) {
        (CACHE_CONTROL, HeaderValue::from_static(LISTING_CACHE_CONTROL))
    }

    /// Load the listing for a route parameter such as `logitech-12`.
    pub async fn load(&self, kind: ListingKind, path_param: &str) -> LoadOutcome {
        let Some(id) = trailing_id(path_param) else {
            info!(kind = kind.as_str(), path_param, "listing route without id, redirecting");
            return LoadOutcome::Redirect {
                status: StatusCode::MOVED_PERMANENTLY,
                location: "/".to_string(),
            };
        };

        let key = Self::cache_key(kind, id);
        if let Some(payload) = self.cached(&key) {
            debug!(key = %key, "listing served from cache");
            return LoadOutcome::Loaded(payload);
        }

        let payload = match self.source.listing(kind, id).await {
            Ok(products) if products.is_empty() => {
                info!(kind = kind.as_str(), id, "listing has no products");
                ListingPayload::empty(kind)
            }
            Ok(products) => build_listing(kind, products),
            Err(e) => {
                warn!(kind = kind.as_str(), id, error = %e, "listing fetch failed");
                ListingPayload::empty(kind)
            }
        };

        self.store(&key, &payload);
        LoadOutcome::Loaded(payload)
    }

    /// Load a single product for a route parameter such as `mx-keys-31`.
    ///
    /// Not cached. Missing ids and source errors yield `None`.
    pub async fn load_product(&self, path_param: &str) -> Option<Product> {
        let id = trailing_id(path_param)?;
        match self.source.product(id).await {
            Ok(product) => product,
            Err(e) => {
                warn!(id, error = %e, "product fetch failed");
                None
            }
        }
    }

    fn cached(&self, key: &str) -> Option<ListingPayload> {
        if !self.caching {
            return None;
        }
        match self.cache.get(key) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key, error = %e, "discarding unreadable cache entry");
                self.cache.delete(key);
                None
            }
        }
    }

    fn store(&self, key: &str, payload: &ListingPayload) {
        if !self.caching {
            return;
        }
        if let Err(e) = self.cache.set_with_ttl(key, payload, self.ttl) {
            warn!(key, error = %e, "failed to cache listing");
        }
    }
}
