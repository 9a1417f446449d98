//! Storefront configuration.
//!
//! Read from TOML, or JSON when the path ends in `.json`. Every section and
//! field is optional and falls back to the production defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shelf_catalog::slug::{ImageUrls, DEFAULT_FALLBACK_IMAGE_URL, DEFAULT_IMAGE_BASE_URL};
use shelf_catalog::ListingKind;
use tracing::debug;

use crate::DataError;

/// Base URL of the product API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.botracomputer.com/api/v1";

/// Seconds a listing payload stays cached.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 900;

/// Top-level storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Product API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Listing cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Image CDN settings.
    #[serde(default)]
    pub images: ImageConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| DataError::config(&shown, e))?;

        let config = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content).map_err(|e| DataError::config(&shown, e))?
        } else {
            Self::from_toml_str(&content).map_err(|e| DataError::config(&shown, e))?
        };

        debug!(path = %shown, "loaded storefront config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Product API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

/// Endpoints of the upstream product API.
///
/// The bundled [`InMemorySource`](crate::InMemorySource) never calls them. They
/// are what an HTTP-backed [`ProductSource`](crate::ProductSource) requests, and
/// the CLI logs them next to each lookup.
impl ApiConfig {
    /// URL listing every enabled product of one brand or category.
    pub fn listing_url(&self, kind: ListingKind, id: &str) -> String {
        format!(
            "{}/products?is_disable=0&limit=all&{}_id={}",
            self.base(),
            kind.as_str(),
            id
        )
    }

    /// URL of a single product.
    pub fn product_url(&self, id: &str) -> String {
        format!("{}/products/{}", self.base(), id)
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

/// Listing cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            enabled: true,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

fn default_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL_SECS
}

fn default_true() -> bool {
    true
}

/// Image CDN settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_image_base_url")]
    pub base_url: String,

    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: default_image_base_url(),
            fallback_url: default_fallback_url(),
        }
    }
}

impl ImageConfig {
    pub fn urls(&self) -> ImageUrls {
        ImageUrls::new(&self.base_url, &self.fallback_url)
    }
}

fn default_image_base_url() -> String {
    DEFAULT_IMAGE_BASE_URL.to_string()
}

fn default_fallback_url() -> String {
    DEFAULT_FALLBACK_IMAGE_URL.to_string()
}
