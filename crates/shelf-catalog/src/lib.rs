//! Catalog model, faceting and client-side filtering for the Shelf storefront.
//!
//! Everything in this crate is a pure computation over an in-memory product
//! list. Nothing here performs I/O and no operation can fail:
//!
//! - **Product**: the API product record and its derived values (effective price, badge)
//! - **Facets**: deduplicated brand/category facets and price bounds
//! - **Filter**: immutable filter state and the product predicate
//! - **Chips**: active-filter chips, their count, and chip removal
//! - **Listing**: brand/category listing pages grouped by a secondary key
//! - **Slug**: slug and image URL helpers
//!
//! # Example
//!
//! ```rust
//! use shelf_catalog::prelude::*;
//!
//! let products: Vec<Product> = Vec::new();
//! let facets = derive_facets(&products);
//!
//! let state = FilterState::new()
//!     .with_brands(["7"])
//!     .with_search("keyboard");
//!
//! let visible = apply_filters(&products, &state);
//! let chips = derive_chips(
//!     &state,
//!     &facets.brand_lookup(),
//!     &facets.category_lookup(),
//!     FacetToggles::default(),
//! );
//!
//! assert!(visible.is_empty());
//! assert_eq!(chips.len(), active_filter_count(&state, FacetToggles::default()));
//! ```

pub mod chips;
pub mod facets;
pub mod filter;
pub mod identity;
pub mod listing;
pub mod product;
pub mod slug;

pub use chips::{active_filter_count, derive_chips, remove_chip, FacetToggles, FilterChip};
pub use facets::{derive_facets, Facet, FacetLookup, FacetSet, PriceBounds};
pub use filter::{apply_filters, FilterState, ProductMatcher};
pub use identity::{identity_key, Dimension};
pub use listing::{build_listing, ListingHero, ListingKind, ListingPayload, ProductGroup};
pub use product::{Badge, Product};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::chips::{
        active_filter_count, derive_chips, remove_chip, FacetToggles, FilterChip,
    };
    pub use crate::facets::{derive_facets, Facet, FacetLookup, FacetSet, PriceBounds};
    pub use crate::filter::{apply_filters, FilterState};
    pub use crate::identity::Dimension;
    pub use crate::listing::{build_listing, ListingKind, ListingPayload, ProductGroup};
    pub use crate::product::Product;
    pub use crate::slug::{build_slug, ImageTransform, ImageUrls};
}
