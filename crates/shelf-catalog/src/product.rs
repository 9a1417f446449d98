//! Product records as supplied by the catalog API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::identity::Dimension;

/// The `in_stock` flag value that means "in stock".
pub const IN_STOCK: i64 = 1;

/// Badge text shown on products that are not in stock.
const OUT_OF_STOCK_TEXT: &str = "Out of stock";
/// Badge color (`#AARRGGBB`) used for out-of-stock products.
const OUT_OF_STOCK_COLOR: &str = "#ffff0000";
/// Badge color used when the configured color is not `#AARRGGBB`.
const DEFAULT_BADGE_COLOR: &str = "#ff0000cc";

/// A product as returned by the catalog API.
///
/// Only `id` is required on the wire. Every other field degrades to a neutral
/// default when it is absent or `null`, so a sparse record never fails to load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: i64,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Canonical brand identity.
    pub brand_id: Option<i64>,
    /// Brand display name; identity fallback when `brand_id` is missing.
    pub brand_name: Option<String>,
    /// Brand logo image path.
    pub brand_logo: Option<String>,
    /// Canonical category identity.
    pub category_id: Option<i64>,
    /// Category display name; identity fallback when `category_id` is missing.
    pub category_name: Option<String>,
    /// Category logo image path.
    pub category_logo: Option<String>,
    /// List price.
    pub regular_price: Option<f64>,
    /// Sale price; takes precedence over `regular_price` when present.
    pub sale_price: Option<f64>,
    /// Stock flag. Only [`IN_STOCK`] counts as in stock.
    #[serde(default, deserialize_with = "null_as_default")]
    pub in_stock: i64,
    /// Comma-separated image paths; the first non-empty one is the primary image.
    pub images: Option<String>,
    /// Promotional badge text.
    pub event_text: Option<String>,
    /// Promotional badge color as `#AARRGGBB`.
    pub event_color: Option<String>,
}

impl Product {
    /// Create a product with only an id and a name set.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Price used for filtering and price bounds.
    ///
    /// The sale price wins over the regular price; a product with neither
    /// is priced at zero.
    pub fn effective_price(&self) -> f64 {
        self.sale_price.or(self.regular_price).unwrap_or(0.0)
    }

    /// Check if the product is in stock.
    pub fn is_in_stock(&self) -> bool {
        self.in_stock == IN_STOCK
    }

    /// Brand identity key (see [`Dimension::key`]).
    pub fn brand_key(&self) -> String {
        Dimension::Brand.key(self)
    }

    /// Category identity key (see [`Dimension::key`]).
    pub fn category_key(&self) -> String {
        Dimension::Category.key(self)
    }

    /// Lower-cased text matched by free-text search: name, brand and category.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {}",
            self.name,
            self.brand_name.as_deref().unwrap_or(""),
            self.category_name.as_deref().unwrap_or("")
        )
        .to_lowercase()
    }

    /// The corner badge shown on product cards, if any.
    pub fn badge(&self) -> Option<Badge> {
        // Cards treat any non-zero flag as stocked.
        let stocked = self.in_stock != 0;

        let text = match &self.event_text {
            Some(text) => text.clone(),
            None if stocked => String::new(),
            None => OUT_OF_STOCK_TEXT.to_string(),
        };
        if text.is_empty() {
            return None;
        }

        let raw_color = match &self.event_color {
            Some(color) => color.as_str(),
            None if stocked => "",
            None => OUT_OF_STOCK_COLOR,
        };

        Some(Badge {
            text,
            color: argb_to_rgba(raw_color),
        })
    }
}

/// A product card badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Badge text.
    pub text: String,
    /// CSS color as `#RRGGBBAA`.
    pub color: String,
}

/// Rewrite an `#AARRGGBB` color as CSS `#RRGGBBAA`.
fn argb_to_rgba(color: &str) -> String {
    if color.len() == 9 && color.is_char_boundary(1) && color.is_char_boundary(3) {
        format!("#{}{}", &color[3..], &color[1..3])
    } else {
        DEFAULT_BADGE_COLOR.to_string()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price_prefers_sale() {
        let mut product = Product::new(1, "Mouse");
        assert_eq!(product.effective_price(), 0.0);

        product.regular_price = Some(50.0);
        assert_eq!(product.effective_price(), 50.0);

        product.sale_price = Some(42.5);
        assert_eq!(product.effective_price(), 42.5);
    }

    #[test]
    fn test_in_stock_requires_exact_flag() {
        let mut product = Product::new(1, "Mouse");
        assert!(!product.is_in_stock());

        product.in_stock = 1;
        assert!(product.is_in_stock());

        product.in_stock = 2;
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_deserialize_sparse_record() {
        let json = r#"{"id": 9, "name": null, "in_stock": null, "sale_price": 10.5, "extra": true}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, 9);
        assert_eq!(product.name, "");
        assert_eq!(product.in_stock, 0);
        assert_eq!(product.sale_price, Some(10.5));
        assert_eq!(product.brand_id, None);
    }

    #[test]
    fn test_search_text_treats_missing_as_empty() {
        let mut product = Product::new(1, "Keyboard K1");
        product.brand_name = Some("Logitech".to_string());

        assert_eq!(product.search_text(), "keyboard k1 logitech ");
    }

    #[test]
    fn test_badge_out_of_stock() {
        let product = Product::new(1, "Mouse");
        let badge = product.badge().unwrap();

        assert_eq!(badge.text, "Out of stock");
        assert_eq!(badge.color, "#ff0000ff");
    }

    #[test]
    fn test_badge_event_overrides() {
        let mut product = Product::new(1, "Mouse");
        product.in_stock = 1;
        assert!(product.badge().is_none());

        product.event_text = Some("Sale".to_string());
        product.event_color = Some("#80112233".to_string());
        let badge = product.badge().unwrap();
        assert_eq!(badge.text, "Sale");
        assert_eq!(badge.color, "#11223380");

        product.event_color = Some("red".to_string());
        assert_eq!(product.badge().unwrap().color, "#ff0000cc");
    }

    #[test]
    fn test_badge_empty_event_text_hides_badge() {
        let mut product = Product::new(1, "Mouse");
        product.event_text = Some(String::new());
        assert!(product.badge().is_none());
    }
}
