//! Filter state and the product predicate.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::identity::Dimension;
use crate::product::Product;

/// User-selected filter criteria.
///
/// A filter state is a value: every edit method returns a new state and
/// leaves the receiver untouched. The default state filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    /// Selected brand identity keys. Empty means any brand.
    pub brands: Vec<String>,
    /// Selected category identity keys. Empty means any category.
    pub categories: Vec<String>,
    /// Inclusive lower price bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Inclusive upper price bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Only keep products that are in stock.
    pub in_stock_only: bool,
    /// Free-text search, matched case-insensitively.
    pub search: String,
}

impl FilterState {
    /// Create a state with no filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected identity keys for a dimension.
    pub fn selection(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Brand => &self.brands,
            Dimension::Category => &self.categories,
        }
    }

    /// Replace the selection for a dimension. Duplicates are dropped.
    pub fn with_selection<I, S>(&self, dimension: Dimension, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let ids: Vec<String> = ids
            .into_iter()
            .map(Into::into)
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let mut next = self.clone();
        match dimension {
            Dimension::Brand => next.brands = ids,
            Dimension::Category => next.categories = ids,
        }
        next
    }

    pub fn with_brands<I, S>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_selection(Dimension::Brand, ids)
    }

    pub fn with_categories<I, S>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_selection(Dimension::Category, ids)
    }

    /// Select an id if it is not selected, deselect it otherwise.
    pub fn toggle(&self, dimension: Dimension, id: &str) -> Self {
        let current = self.selection(dimension);
        if current.iter().any(|selected| selected == id) {
            self.without(dimension, id)
        } else {
            self.with_selection(
                dimension,
                current.iter().map(String::as_str).chain(std::iter::once(id)),
            )
        }
    }

    /// Remove one id from a dimension's selection.
    pub fn without(&self, dimension: Dimension, id: &str) -> Self {
        let mut next = self.clone();
        match dimension {
            Dimension::Brand => next.brands.retain(|selected| selected != id),
            Dimension::Category => next.categories.retain(|selected| selected != id),
        }
        next
    }

    pub fn toggle_brand(&self, id: &str) -> Self {
        self.toggle(Dimension::Brand, id)
    }

    pub fn toggle_category(&self, id: &str) -> Self {
        self.toggle(Dimension::Category, id)
    }

    pub fn without_brand(&self, id: &str) -> Self {
        self.without(Dimension::Brand, id)
    }

    pub fn without_category(&self, id: &str) -> Self {
        self.without(Dimension::Category, id)
    }

    /// Set the lower price bound. Non-finite input unsets it; negatives clamp to zero.
    pub fn with_min_price(&self, min: Option<f64>) -> Self {
        Self {
            min_price: sanitize_price(min),
            ..self.clone()
        }
    }

    /// Set the upper price bound. Non-finite input unsets it; negatives clamp to zero.
    pub fn with_max_price(&self, max: Option<f64>) -> Self {
        Self {
            max_price: sanitize_price(max),
            ..self.clone()
        }
    }

    pub fn with_price_range(&self, min: Option<f64>, max: Option<f64>) -> Self {
        self.with_min_price(min).with_max_price(max)
    }

    /// Clear both price bounds.
    pub fn without_price_range(&self) -> Self {
        Self {
            min_price: None,
            max_price: None,
            ..self.clone()
        }
    }

    pub fn with_in_stock_only(&self, in_stock_only: bool) -> Self {
        Self {
            in_stock_only,
            ..self.clone()
        }
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    /// A state with every filter removed.
    pub fn cleared(&self) -> Self {
        Self::default()
    }

    /// Check if either price bound is set.
    pub fn has_price_range(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    /// The trimmed search term.
    pub fn search_term(&self) -> &str {
        self.search.trim()
    }

    /// Check if any criterion differs from the default state.
    pub fn has_active_filters(&self) -> bool {
        !self.brands.is_empty()
            || !self.categories.is_empty()
            || !self.search_term().is_empty()
            || self.has_price_range()
            || self.in_stock_only
    }

    /// Prepare a predicate for repeated evaluation.
    pub fn matcher(&self) -> ProductMatcher<'_> {
        ProductMatcher::new(self)
    }

    /// Check a single product against every active criterion.
    pub fn matches(&self, product: &Product) -> bool {
        self.matcher().matches(product)
    }
}

fn sanitize_price(price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite()).map(|p| p.max(0.0))
}

/// A filter state compiled for matching many products.
///
/// Selections become hash sets and the search term is lower-cased once.
#[derive(Debug, Clone)]
pub struct ProductMatcher<'a> {
    brands: HashSet<&'a str>,
    categories: HashSet<&'a str>,
    in_stock_only: bool,
    min_price: Option<f64>,
    max_price: Option<f64>,
    search: String,
}

impl<'a> ProductMatcher<'a> {
    pub fn new(state: &'a FilterState) -> Self {
        Self {
            brands: state.brands.iter().map(String::as_str).collect(),
            categories: state.categories.iter().map(String::as_str).collect(),
            in_stock_only: state.in_stock_only,
            min_price: state.min_price,
            max_price: state.max_price,
            search: state.search_term().to_lowercase(),
        }
    }

    /// Check a product against every active clause.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.brands.is_empty() && !self.brands.contains(product.brand_key().as_str()) {
            return false;
        }

        if !self.categories.is_empty()
            && !self.categories.contains(product.category_key().as_str())
        {
            return false;
        }

        if self.in_stock_only && !product.is_in_stock() {
            return false;
        }

        let price = product.effective_price();
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }

        if !self.search.is_empty() && !product.search_text().contains(&self.search) {
            return false;
        }

        true
    }
}

/// Keep the products matching `state`, in their original order.
pub fn apply_filters(products: &[Product], state: &FilterState) -> Vec<Product> {
    let matcher = state.matcher();
    products
        .iter()
        .filter(|product| matcher.matches(product))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, brand: Option<(i64, &str)>, price: f64) -> Product {
        let mut product = Product::new(id, name);
        if let Some((brand_id, brand_name)) = brand {
            product.brand_id = Some(brand_id);
            product.brand_name = Some(brand_name.to_string());
        }
        product.regular_price = Some(price);
        product
    }

    #[test]
    fn test_default_state_keeps_everything() {
        let products = vec![
            product(1, "Keyboard", Some((7, "Acme")), 20.0),
            product(2, "Mouse", None, 10.0),
        ];
        assert_eq!(apply_filters(&products, &FilterState::new()), products);
    }

    #[test]
    fn test_brand_id_is_canonical() {
        let products = vec![product(1, "Keyboard", Some((7, "Acme")), 20.0)];

        let by_id = FilterState::new().with_brands(["7"]);
        assert_eq!(apply_filters(&products, &by_id).len(), 1);

        let by_name = FilterState::new().with_brands(["Acme"]);
        assert!(apply_filters(&products, &by_name).is_empty());
    }

    #[test]
    fn test_category_name_fallback() {
        let mut cable = Product::new(1, "Cable");
        cable.category_name = Some(" Accessories ".to_string());

        let state = FilterState::new().with_categories(["Accessories"]);
        assert!(state.matches(&cable));
    }

    #[test]
    fn test_price_range_uses_regular_price_fallback() {
        let products = vec![product(1, "Monitor", None, 50.0)];

        let inside = FilterState::new().with_price_range(Some(40.0), Some(60.0));
        assert_eq!(apply_filters(&products, &inside).len(), 1);

        let above = FilterState::new().with_min_price(Some(60.0));
        assert!(apply_filters(&products, &above).is_empty());

        let inclusive = FilterState::new().with_price_range(Some(50.0), Some(50.0));
        assert_eq!(apply_filters(&products, &inclusive).len(), 1);
    }

    #[test]
    fn test_in_stock_only() {
        let mut stocked = Product::new(1, "Stocked");
        stocked.in_stock = 1;
        let sold_out = Product::new(2, "Sold out");

        let state = FilterState::new().with_in_stock_only(true);
        let result = apply_filters(&[stocked.clone(), sold_out], &state);
        assert_eq!(result, vec![stocked]);
    }

    #[test]
    fn test_search_matches_brand() {
        let products = vec![
            product(1, "Keyboard K1", Some((1, "Logitech")), 30.0),
            product(2, "Mouse M1", Some((2, "Razer")), 25.0),
        ];

        let state = FilterState::new().with_search("  LOG ");
        let result = apply_filters(&products, &state);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_blank_search_is_inactive() {
        let state = FilterState::new().with_search("   ");
        assert!(!state.has_active_filters());
        assert!(state.matches(&Product::new(1, "Anything")));
    }

    #[test]
    fn test_edits_do_not_touch_original() {
        let state = FilterState::new().with_brands(["1", "2"]);
        let next = state.toggle_brand("2").with_search("cable");

        assert_eq!(state.brands, vec!["1", "2"]);
        assert_eq!(state.search, "");
        assert_eq!(next.brands, vec!["1"]);
        assert_eq!(next.search, "cable");
    }

    #[test]
    fn test_selection_dedup_and_toggle() {
        let state = FilterState::new().with_categories(["3", "3", "4"]);
        assert_eq!(state.categories, vec!["3", "4"]);

        let state = state.toggle_category("5");
        assert_eq!(state.categories, vec!["3", "4", "5"]);

        let state = state.without_category("3");
        assert_eq!(state.categories, vec!["4", "5"]);
    }

    #[test]
    fn test_price_inputs_are_sanitized() {
        let state = FilterState::new()
            .with_min_price(Some(-5.0))
            .with_max_price(Some(f64::INFINITY));

        assert_eq!(state.min_price, Some(0.0));
        assert_eq!(state.max_price, None);
        assert!(state.has_price_range());
        assert!(!state.without_price_range().has_price_range());
    }

    #[test]
    fn test_cleared() {
        let state = FilterState::new()
            .with_brands(["1"])
            .with_in_stock_only(true)
            .with_search("x");
        assert!(state.has_active_filters());
        assert_eq!(state.cleared(), FilterState::new());
    }

    #[test]
    fn test_state_json_shape() {
        let state = FilterState::new().with_min_price(Some(10.0)).with_in_stock_only(true);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["minPrice"], 10.0);
        assert_eq!(json["inStockOnly"], true);
        assert!(json.get("maxPrice").is_none());

        let parsed: FilterState = serde_json::from_str(r#"{"search": "log"}"#).unwrap();
        assert_eq!(parsed, FilterState::new().with_search("log"));
    }
}
