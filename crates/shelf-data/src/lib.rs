//! Data access for the Shelf storefront.
//!
//! - **Config**: storefront configuration (API, cache, images)
//! - **Source**: the [`ProductSource`] seam and the API's response envelopes
//! - **Loader**: cached listing and product loaders used by the page routes

pub mod config;
mod error;
pub mod loader;
pub mod source;

pub use config::StorefrontConfig;
pub use error::DataError;
pub use loader::{ListingLoader, LoadOutcome, LISTING_CACHE_CONTROL};
pub use source::{
    decode_listing_envelope, decode_product_envelope, decode_products, InMemorySource,
    ProductSource,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        DataError, InMemorySource, ListingLoader, LoadOutcome, ProductSource, StorefrontConfig,
    };
}
