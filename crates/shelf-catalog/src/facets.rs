//! Facet derivation: brand/category facets and price bounds.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::identity::Dimension;
use crate::product::Product;

/// A selectable facet value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Facet {
    /// Identity key matched against [`crate::FilterState`] selections.
    pub id: String,
    /// Display label.
    pub label: String,
}

/// Whole-number price range observed in a product list.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceBounds {
    /// Floor of the lowest price, never below zero.
    pub min: f64,
    /// Ceiling of the highest price.
    pub max: f64,
}

impl PriceBounds {
    /// Scan the effective price of every product.
    ///
    /// Yields `{0, 0}` for an empty list or when no price is finite.
    pub fn from_products(products: &[Product]) -> Self {
        let mut observed: Option<(f64, f64)> = None;

        for price in products
            .iter()
            .map(Product::effective_price)
            .filter(|price| price.is_finite())
        {
            observed = Some(match observed {
                Some((min, max)) => (min.min(price), max.max(price)),
                None => (price, price),
            });
        }

        match observed {
            Some((min, max)) => Self {
                min: min.floor().max(0.0),
                max: max.ceil(),
            },
            None => Self::default(),
        }
    }
}

/// Facets derived from one product list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FacetSet {
    /// Brand facets sorted by label.
    pub brands: Vec<Facet>,
    /// Category facets sorted by label.
    pub categories: Vec<Facet>,
    /// Price range across all products.
    pub price_bounds: PriceBounds,
}

impl FacetSet {
    /// Facets for one dimension.
    pub fn facets(&self, dimension: Dimension) -> &[Facet] {
        match dimension {
            Dimension::Brand => &self.brands,
            Dimension::Category => &self.categories,
        }
    }

    /// Label lookup for one dimension.
    pub fn lookup(&self, dimension: Dimension) -> FacetLookup {
        self.facets(dimension).iter().collect()
    }

    pub fn brand_lookup(&self) -> FacetLookup {
        self.lookup(Dimension::Brand)
    }

    pub fn category_lookup(&self) -> FacetLookup {
        self.lookup(Dimension::Category)
    }

    /// Check if there is nothing to filter on.
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty() && self.categories.is_empty()
    }
}

/// Facet labels keyed by identity key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FacetLookup {
    labels: HashMap<String, String>,
}

impl FacetLookup {
    /// Label for an identity key.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.labels.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<'a> FromIterator<&'a Facet> for FacetLookup {
    fn from_iter<I: IntoIterator<Item = &'a Facet>>(iter: I) -> Self {
        Self {
            labels: iter
                .into_iter()
                .map(|facet| (facet.id.clone(), facet.label.clone()))
                .collect(),
        }
    }
}

/// Derive brand facets, category facets and price bounds from a product list.
pub fn derive_facets(products: &[Product]) -> FacetSet {
    FacetSet {
        brands: facet_values(products, Dimension::Brand),
        categories: facet_values(products, Dimension::Category),
        price_bounds: PriceBounds::from_products(products),
    }
}

/// Unique facet values for one dimension, sorted by label.
///
/// Products without an identity key are skipped. When a key shows up with
/// different labels the last one seen wins, keeping the key's first position.
pub fn facet_values(products: &[Product], dimension: Dimension) -> Vec<Facet> {
    let mut facets: Vec<Facet> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for product in products {
        let id = dimension.key(product);
        if id.is_empty() {
            continue;
        }
        let label = dimension.label(product);

        match positions.get(&id) {
            Some(&index) => facets[index].label = label,
            None => {
                positions.insert(id.clone(), facets.len());
                facets.push(Facet { id, label });
            }
        }
    }

    facets.sort_by(|a, b| compare_labels(&a.label, &b.label));
    facets
}

/// Compare display labels the way a browser's default collation orders them.
///
/// Base letters decide first, ignoring accents and case, so `Élan` sorts with
/// the e's. Ties go to the unaccented label, then to lower case.
pub(crate) fn compare_labels(a: &str, b: &str) -> Ordering {
    collation_key(a, true)
        .cmp(&collation_key(b, true))
        .then_with(|| collation_key(a, false).cmp(&collation_key(b, false)))
        .then_with(|| b.cmp(a))
}

fn collation_key(label: &str, strip_accents: bool) -> String {
    label
        .nfd()
        .filter(|c| !(strip_accents && is_combining_mark(*c)))
        .flat_map(char::to_lowercase)
        .collect()
}
