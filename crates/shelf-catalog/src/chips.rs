//! Active-filter chips and the active-filter count.
//!
//! Every non-default criterion of a [`FilterState`] contributes one unit to
//! [`active_filter_count`] and one chip per unit to [`derive_chips`], so the
//! badge count and the chip row always agree. Removing a chip with
//! [`remove_chip`] reverts exactly the criterion it stands for.

use serde::{Deserialize, Serialize};

use crate::facets::{FacetLookup, PriceBounds};
use crate::filter::FilterState;
use crate::identity::Dimension;

/// Which selection facets are shown on a page.
///
/// A brand page hides the brand facet and a category page hides the category
/// facet; hidden facets contribute neither chips nor count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacetToggles {
    pub brand: bool,
    pub category: bool,
}

impl FacetToggles {
    /// Both facets enabled.
    pub fn all() -> Self {
        Self {
            brand: true,
            category: true,
        }
    }

    pub fn includes(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Brand => self.brand,
            Dimension::Category => self.category,
        }
    }
}

impl Default for FacetToggles {
    fn default() -> Self {
        Self::all()
    }
}

/// One removable active-filter criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterChip {
    /// A selected brand.
    Brand { id: String, label: String },
    /// A selected category.
    Category { id: String, label: String },
    /// The price range; either bound may be open.
    Price { min: Option<f64>, max: Option<f64> },
    /// The in-stock restriction.
    Stock,
    /// The trimmed search term.
    Search { term: String },
}

impl FilterChip {
    /// Stable key for rendering lists of chips.
    pub fn key(&self) -> String {
        match self {
            FilterChip::Brand { id, .. } => format!("brand-{}", id),
            FilterChip::Category { id, .. } => format!("category-{}", id),
            FilterChip::Price { .. } => "price".to_string(),
            FilterChip::Stock => "stock".to_string(),
            FilterChip::Search { .. } => "search".to_string(),
        }
    }

    /// Text shown on the chip. Open price bounds display the observed bounds.
    pub fn display_label(&self, bounds: PriceBounds) -> String {
        match self {
            FilterChip::Brand { label, .. } | FilterChip::Category { label, .. } => label.clone(),
            FilterChip::Price { min, max } => format!(
                "Price: {} \u{2013} {}",
                min.unwrap_or(bounds.min),
                max.unwrap_or(bounds.max)
            ),
            FilterChip::Stock => "In stock only".to_string(),
            FilterChip::Search { term } => format!("Search: {}", term),
        }
    }
}

/// Count the active criteria of `state`.
pub fn active_filter_count(state: &FilterState, toggles: FacetToggles) -> usize {
    let mut count = 0;

    for dimension in [Dimension::Brand, Dimension::Category] {
        if toggles.includes(dimension) {
            count += state.selection(dimension).len();
        }
    }
    if state.has_price_range() {
        count += 1;
    }
    if state.in_stock_only {
        count += 1;
    }
    if !state.search_term().is_empty() {
        count += 1;
    }

    count
}

/// Build the chip row for `state`.
///
/// Selected ids missing from the lookups fall back to `"Brand {id}"` and
/// `"Category {id}"` labels.
pub fn derive_chips(
    state: &FilterState,
    brand_lookup: &FacetLookup,
    category_lookup: &FacetLookup,
    toggles: FacetToggles,
) -> Vec<FilterChip> {
    let mut chips = Vec::new();

    if toggles.brand {
        chips.extend(state.brands.iter().map(|id| FilterChip::Brand {
            id: id.clone(),
            label: chip_label(brand_lookup, Dimension::Brand, id),
        }));
    }

    if toggles.category {
        chips.extend(state.categories.iter().map(|id| FilterChip::Category {
            id: id.clone(),
            label: chip_label(category_lookup, Dimension::Category, id),
        }));
    }

    if state.has_price_range() {
        chips.push(FilterChip::Price {
            min: state.min_price,
            max: state.max_price,
        });
    }

    if state.in_stock_only {
        chips.push(FilterChip::Stock);
    }

    let term = state.search_term();
    if !term.is_empty() {
        chips.push(FilterChip::Search {
            term: term.to_string(),
        });
    }

    chips
}

fn chip_label(lookup: &FacetLookup, dimension: Dimension, id: &str) -> String {
    lookup
        .get(id)
        .map(str::to_string)
        .unwrap_or_else(|| dimension.fallback_chip_label(id))
}

/// Revert the criterion a chip stands for, leaving everything else as is.
pub fn remove_chip(state: &FilterState, chip: &FilterChip) -> FilterState {
    match chip {
        FilterChip::Brand { id, .. } => state.without_brand(id),
        FilterChip::Category { id, .. } => state.without_category(id),
        FilterChip::Price { .. } => state.without_price_range(),
        FilterChip::Stock => state.with_in_stock_only(false),
        FilterChip::Search { .. } => state.with_search(""),
    }
}
