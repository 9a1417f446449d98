//! Product sources and the API's response envelopes.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use shelf_catalog::{Dimension, ListingKind, Product};

use crate::DataError;

/// Where listing and product data comes from.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Every product of one brand or category.
    async fn listing(&self, kind: ListingKind, id: &str) -> Result<Vec<Product>, DataError>;

    /// A single product, or `None` when the source has no such product.
    async fn product(&self, id: &str) -> Result<Option<Product>, DataError>;
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// Decode a listing response: `{"data": {"data": [...]}}`.
///
/// Missing or `null` layers decode to an empty list.
pub fn decode_listing_envelope(body: &[u8]) -> Result<Vec<Product>, DataError> {
    let envelope: Envelope<Envelope<Vec<Product>>> = serde_json::from_slice(body)?;
    Ok(envelope
        .data
        .and_then(|page| page.data)
        .unwrap_or_default())
}

/// Decode a single-product response: `{"data": {...}}`.
pub fn decode_product_envelope(body: &[u8]) -> Result<Option<Product>, DataError> {
    let envelope: Envelope<Product> = serde_json::from_slice(body)?;
    Ok(envelope.data)
}

/// Decode a product file: either a bare array or a listing envelope.
pub fn decode_products(body: &[u8]) -> Result<Vec<Product>, DataError> {
    match serde_json::from_slice::<Vec<Product>>(body) {
        Ok(products) => Ok(products),
        Err(_) => decode_listing_envelope(body),
    }
}

/// A source backed by products held in memory.
///
/// Used by the CLI (products read from a file) and by tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    listings: HashMap<(ListingKind, String), Vec<Product>>,
    products: HashMap<String, Product>,
    unavailable: bool,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index `products` by id, brand id and category id.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut source = Self::new();
        for product in products {
            for kind in [ListingKind::Brand, ListingKind::Category] {
                if let Some(id) = kind.dimension().id(&product) {
                    source
                        .listings
                        .entry((kind, id.to_string()))
                        .or_default()
                        .push(product.clone());
                }
            }
            source.products.insert(product.id.to_string(), product);
        }
        source
    }

    /// Set the products answered for one listing.
    pub fn with_listing(
        mut self,
        kind: ListingKind,
        id: impl Into<String>,
        products: Vec<Product>,
    ) -> Self {
        self.listings.insert((kind, id.into()), products);
        self
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id.to_string(), product);
        self
    }

    /// Make every request fail, as an unreachable API would.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Ids with at least one product in `dimension`, sorted.
    pub fn listing_ids(&self, dimension: Dimension) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .listings
            .keys()
            .filter(|(kind, _)| kind.dimension() == dimension)
            .map(|(_, id)| id.as_str())
            .collect();
        ids.sort_unstable();
        ids
    }

    fn check_available(&self) -> Result<(), DataError> {
        if self.unavailable {
            Err(DataError::Unavailable("in-memory source disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductSource for InMemorySource {
    async fn listing(&self, kind: ListingKind, id: &str) -> Result<Vec<Product>, DataError> {
        self.check_available()?;
        Ok(self
            .listings
            .get(&(kind, id.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn product(&self, id: &str) -> Result<Option<Product>, DataError> {
        self.check_available()?;
        Ok(self.products.get(id).cloned())
    }
}
