//! Identity keys for the brand and category dimensions.
//!
//! Both dimensions identify a product the same way: the numeric id when the
//! API supplies one, otherwise the trimmed display name. [`Dimension`] carries
//! the per-dimension field accessors so the derivation lives in one place.

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// Derive an identity key from a numeric id and a name fallback.
///
/// Returns an empty string when both are missing; callers treat an empty key
/// as "no identity" and skip the product for that facet.
pub fn identity_key(id: Option<i64>, name: Option<&str>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => name.map(str::trim).unwrap_or_default().to_string(),
    }
}

/// A faceted product dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Brand,
    Category,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Brand => "brand",
            Dimension::Category => "category",
        }
    }

    /// Numeric id of the product in this dimension.
    pub fn id(&self, product: &Product) -> Option<i64> {
        match self {
            Dimension::Brand => product.brand_id,
            Dimension::Category => product.category_id,
        }
    }

    /// Display name of the product in this dimension.
    pub fn name<'a>(&self, product: &'a Product) -> Option<&'a str> {
        match self {
            Dimension::Brand => product.brand_name.as_deref(),
            Dimension::Category => product.category_name.as_deref(),
        }
    }

    /// Logo image path of the product in this dimension.
    pub fn logo<'a>(&self, product: &'a Product) -> Option<&'a str> {
        match self {
            Dimension::Brand => product.brand_logo.as_deref(),
            Dimension::Category => product.category_logo.as_deref(),
        }
    }

    /// Identity key of the product in this dimension.
    pub fn key(&self, product: &Product) -> String {
        identity_key(self.id(product), self.name(product))
    }

    /// Facet label of the product in this dimension.
    pub fn label(&self, product: &Product) -> String {
        self.name(product)
            .unwrap_or_else(|| self.unknown_label())
            .to_string()
    }

    /// Label used when a product has an identity but no name.
    pub fn unknown_label(&self) -> &'static str {
        match self {
            Dimension::Brand => "Unknown brand",
            Dimension::Category => "Miscellaneous",
        }
    }

    /// Chip label used when a selected id is missing from the facet lookup.
    pub fn fallback_chip_label(&self, id: &str) -> String {
        match self {
            Dimension::Brand => format!("Brand {}", id),
            Dimension::Category => format!("Category {}", id),
        }
    }
}
