//! CLI command implementations.

pub mod chips;
pub mod config;
pub mod facets;
pub mod filter;
pub mod listing;
pub mod product;
pub mod slug;

use clap::{Args, ValueEnum};
use shelf_catalog::{FacetToggles, FilterState, ListingKind};

/// Listing page kind, as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Brand,
    Category,
}

impl From<KindArg> for ListingKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Brand => ListingKind::Brand,
            KindArg::Category => ListingKind::Category,
        }
    }
}

/// Filter criteria shared by `filter` and `chips`.
#[derive(Args, Debug, Default)]
pub struct StateArgs {
    /// Brand id to select (repeatable).
    #[arg(long = "brand")]
    pub brands: Vec<String>,

    /// Category id to select (repeatable).
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Lower price bound (inclusive).
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Upper price bound (inclusive).
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Only show products in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Case-insensitive search over name, brand and category.
    #[arg(short, long, default_value = "")]
    pub search: String,
}

impl StateArgs {
    /// Build the filter state these flags describe.
    pub fn to_state(&self) -> FilterState {
        FilterState::new()
            .with_brands(self.brands.iter().cloned())
            .with_categories(self.categories.iter().cloned())
            .with_price_range(self.min_price, self.max_price)
            .with_in_stock_only(self.in_stock)
            .with_search(self.search.as_str())
    }
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    /// Only list values of one dimension.
    #[arg(long, value_enum)]
    pub only: Option<KindArg>,
}

/// Arguments for the filter command.
#[derive(Args)]
pub struct FilterArgs {
    #[command(flatten)]
    pub state: StateArgs,

    /// Group the result as a brand or category listing page.
    #[arg(long, value_enum)]
    pub listing: Option<KindArg>,
}

/// Arguments for the chips command.
#[derive(Args)]
pub struct ChipsArgs {
    #[command(flatten)]
    pub state: StateArgs,

    /// Hide the facet of a listing page (a brand page hides brands).
    #[arg(long, value_enum)]
    pub listing: Option<KindArg>,

    /// Chip to remove before printing, by key (e.g. `brand-7`, `price`).
    #[arg(long)]
    pub remove: Option<String>,
}

impl ChipsArgs {
    pub fn toggles(&self) -> FacetToggles {
        match self.listing {
            Some(KindArg::Brand) => FacetToggles {
                brand: false,
                category: true,
            },
            Some(KindArg::Category) => FacetToggles {
                brand: true,
                category: false,
            },
            None => FacetToggles::all(),
        }
    }
}

/// Arguments for the listing command.
#[derive(Args)]
pub struct ListingArgs {
    /// Listing kind.
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Route parameter, e.g. `logitech-12`.
    pub param: String,

    /// Load the listing this many times to exercise the cache.
    #[arg(long, default_value_t = 1)]
    pub repeat: usize,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Route parameter, e.g. `logitech-mx-keys-31`.
    pub param: String,

    /// Card image size in pixels.
    #[arg(long, default_value_t = 300)]
    pub image_size: u32,
}

/// Arguments for the slug command.
#[derive(Args)]
pub struct SlugArgs {
    /// Segments to join; blank segments are skipped.
    #[arg(required = true)]
    pub segments: Vec<String>,
}
