//! Brand and category listing pages.
//!
//! A listing page shows every product of one brand (or one category) split
//! into sections by the other dimension. Sections are filtered independently
//! and a section that filters down to nothing is dropped.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::facets::compare_labels;
use crate::filter::FilterState;
use crate::identity::Dimension;
use crate::product::Product;

/// Section title for products without a grouping name.
pub const OTHER_GROUP: &str = "Other";

/// Kind of listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    /// All products of one brand, sectioned by category.
    Brand,
    /// All products of one category, sectioned by brand.
    Category,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Brand => "brand",
            ListingKind::Category => "category",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "brand" => Some(ListingKind::Brand),
            "category" => Some(ListingKind::Category),
            _ => None,
        }
    }

    /// The dimension the page is about; supplies the hero.
    pub fn dimension(&self) -> Dimension {
        match self {
            ListingKind::Brand => Dimension::Brand,
            ListingKind::Category => Dimension::Category,
        }
    }

    /// The dimension sections are grouped by.
    pub fn group_dimension(&self) -> Dimension {
        match self {
            ListingKind::Brand => Dimension::Category,
            ListingKind::Category => Dimension::Brand,
        }
    }

    /// Message shown when the listing has no products.
    pub fn empty_message(&self) -> &'static str {
        match self {
            ListingKind::Brand => {
                "We couldn't find any products for this brand right now. \
                 Please explore other brands or come back later."
            }
            ListingKind::Category => {
                "No products are currently available in this category. \
                 Please check back soon or browse our other collections."
            }
        }
    }
}

/// A titled section of a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductGroup {
    pub title: String,
    pub products: Vec<Product>,
}

/// Name and logo of the brand or category a listing is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingHero {
    pub name: Option<String>,
    pub logo: Option<String>,
}

/// Everything a listing page renders from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPayload {
    pub kind: ListingKind,
    pub hero: Option<ListingHero>,
    pub groups: Vec<ProductGroup>,
    pub first_product: Option<Product>,
    pub total_products: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ListingPayload {
    /// The payload served when no products could be loaded.
    pub fn empty(kind: ListingKind) -> Self {
        Self {
            kind,
            hero: None,
            groups: Vec::new(),
            first_product: None,
            total_products: 0,
            message: Some(kind.empty_message().to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Every product across all sections, in section order.
    pub fn all_products(&self) -> Vec<Product> {
        self.groups
            .iter()
            .flat_map(|group| group.products.iter().cloned())
            .collect()
    }

    /// The sections left after filtering each one with `state`.
    pub fn filtered(&self, state: &FilterState) -> Vec<ProductGroup> {
        filter_groups(&self.groups, state)
    }
}

/// Build a listing payload from the products of one brand or category.
pub fn build_listing(kind: ListingKind, products: Vec<Product>) -> ListingPayload {
    let groups = group_products(products, kind.group_dimension());
    let first_product = groups
        .first()
        .and_then(|group| group.products.first())
        .cloned();
    let hero = first_product.as_ref().map(|product| ListingHero {
        name: kind.dimension().name(product).map(str::to_string),
        logo: kind.dimension().logo(product).map(str::to_string),
    });
    let total_products = groups.iter().map(|group| group.products.len()).sum();

    ListingPayload {
        kind,
        hero,
        groups,
        first_product,
        total_products,
        message: None,
    }
}

/// Sort products by their name in `by`, then section them by the trimmed name.
///
/// The sort is stable and sections appear in the order their first product
/// appears after sorting. Blank names land in the [`OTHER_GROUP`] section.
pub fn group_products(mut products: Vec<Product>, by: Dimension) -> Vec<ProductGroup> {
    products.sort_by(|a, b| compare_labels(by.name(a).unwrap_or(""), by.name(b).unwrap_or("")));

    let mut groups: Vec<ProductGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for product in products {
        let title = match by.name(&product).map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => OTHER_GROUP.to_string(),
        };

        match positions.get(&title) {
            Some(&index) => groups[index].products.push(product),
            None => {
                positions.insert(title.clone(), groups.len());
                groups.push(ProductGroup {
                    title,
                    products: vec![product],
                });
            }
        }
    }

    groups
}

/// Filter each section independently, dropping sections left empty.
pub fn filter_groups(groups: &[ProductGroup], state: &FilterState) -> Vec<ProductGroup> {
    let matcher = state.matcher();
    groups
        .iter()
        .map(|group| ProductGroup {
            title: group.title.clone(),
            products: group
                .products
                .iter()
                .filter(|product| matcher.matches(product))
                .cloned()
                .collect(),
        })
        .filter(|group| !group.products.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, brand: Option<&str>, category: Option<&str>, price: f64) -> Product {
        let mut product = Product::new(id, format!("Item {}", id));
        product.brand_name = brand.map(str::to_string);
        product.category_name = category.map(str::to_string);
        product.regular_price = Some(price);
        product
    }

    fn titles(groups: &[ProductGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.title.as_str()).collect()
    }

    #[test]
    fn test_brand_listing_groups_by_category() {
        let mut first = item(1, Some("Acme"), Some("Mice"), 10.0);
        first.brand_logo = Some("acme.png".to_string());
        let products = vec![
            first,
            item(2, Some("Acme"), Some("Keyboards"), 20.0),
            item(3, Some("Acme"), None, 30.0),
            item(4, Some("Acme"), Some("Mice"), 40.0),
        ];

        let payload = build_listing(ListingKind::Brand, products);
        assert_eq!(titles(&payload.groups), vec!["Other", "Keyboards", "Mice"]);
        assert_eq!(payload.total_products, 4);
        assert_eq!(payload.first_product.as_ref().map(|p| p.id), Some(3));
        assert_eq!(payload.hero.as_ref().and_then(|h| h.name.as_deref()), Some("Acme"));

        let mice: Vec<i64> = payload.groups[2].products.iter().map(|p| p.id).collect();
        assert_eq!(mice, vec![1, 4]);
    }

    #[test]
    fn test_category_listing_groups_by_brand() {
        let products = vec![
            item(1, Some("Razer"), Some("Mice"), 10.0),
            item(2, Some("logitech"), Some("Mice"), 20.0),
            item(3, Some("  "), Some("Mice"), 30.0),
        ];

        let payload = build_listing(ListingKind::Category, products);
        assert_eq!(titles(&payload.groups), vec!["Other", "logitech", "Razer"]);
        assert_eq!(payload.hero.unwrap().name.as_deref(), Some("Mice"));
    }

    #[test]
    fn test_accented_group_titles_sort_by_base_letter() {
        let products = vec![
            item(1, Some("Acme"), Some("Webcams"), 10.0),
            item(2, Some("Acme"), Some("Écrans"), 20.0),
            item(3, Some("Acme"), Some("Docks"), 30.0),
        ];

        let payload = build_listing(ListingKind::Brand, products);
        assert_eq!(titles(&payload.groups), vec!["Docks", "Écrans", "Webcams"]);
    }

    #[test]
    fn test_trimmed_names_share_a_group() {
        let products = vec![
            item(1, Some("Acme"), Some("Mice "), 10.0),
            item(2, Some("Acme"), Some("Mice"), 20.0),
        ];

        let groups = group_products(products, Dimension::Category);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].products.len(), 2);
    }

    #[test]
    fn test_filtering_drops_empty_groups() {
        let products = vec![
            item(1, Some("Acme"), Some("Mice"), 10.0),
            item(2, Some("Acme"), Some("Keyboards"), 20.0),
            item(3, Some("Acme"), Some("Mice"), 40.0),
        ];
        let payload = build_listing(ListingKind::Brand, products);

        let state = FilterState::new().with_max_price(Some(15.0));
        let filtered = payload.filtered(&state);
        assert_eq!(titles(&filtered), vec!["Mice"]);
        assert_eq!(filtered[0].products.len(), 1);

        assert_eq!(payload.filtered(&FilterState::new()), payload.groups);
    }

    #[test]
    fn test_empty_payload() {
        let payload = ListingPayload::empty(ListingKind::Category);
        assert!(payload.is_empty());
        assert!(payload.hero.is_none());
        assert!(payload.message.unwrap().starts_with("No products"));

        let built = build_listing(ListingKind::Brand, Vec::new());
        assert!(built.hero.is_none());
        assert_eq!(built.total_products, 0);
    }

    #[test]
    fn test_all_products_follow_group_order() {
        let products = vec![
            item(1, Some("Acme"), Some("Mice"), 10.0),
            item(2, Some("Acme"), Some("Keyboards"), 20.0),
        ];
        let payload = build_listing(ListingKind::Brand, products);
        let ids: Vec<i64> = payload.all_products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!(ListingKind::from_str("Brand"), Some(ListingKind::Brand));
        assert_eq!(ListingKind::from_str("category"), Some(ListingKind::Category));
        assert_eq!(ListingKind::from_str("tag"), None);
    }
}
