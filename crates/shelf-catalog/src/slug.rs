//! URL slugs and image URLs.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::product::Product;

/// Default image CDN prefix for SEO image URLs.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://ik.imagekit.io/botracomputer/ik-seo";
/// Image served when a record has no image path.
pub const DEFAULT_FALLBACK_IMAGE_URL: &str = "https://ik.imagekit.io/botracomputer/logo.png";

/// One slug segment: free text gets sanitized, numbers are kept verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlugSegment<'a> {
    Text(Option<&'a str>),
    Number(Option<i64>),
}

impl<'a> From<&'a str> for SlugSegment<'a> {
    fn from(s: &'a str) -> Self {
        SlugSegment::Text(Some(s))
    }
}

impl<'a> From<Option<&'a str>> for SlugSegment<'a> {
    fn from(s: Option<&'a str>) -> Self {
        SlugSegment::Text(s)
    }
}

impl From<i64> for SlugSegment<'_> {
    fn from(n: i64) -> Self {
        SlugSegment::Number(Some(n))
    }
}

impl From<Option<i64>> for SlugSegment<'_> {
    fn from(n: Option<i64>) -> Self {
        SlugSegment::Number(n)
    }
}

/// Reduce free text to a lower-case, dash-separated slug segment.
///
/// The text is NFKD-decomposed first, so accented letters keep their base
/// letter. Characters other than ASCII letters, digits, `_`, whitespace and `-`
/// are then dropped. Runs of whitespace and dashes collapse into a single `-`.
pub fn sanitize_slug_segment(value: &str) -> String {
    let kept: String = value
        .nfkd()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(kept.len());
    for c in kept.trim().chars() {
        if c == '-' || c.is_whitespace() {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        } else {
            slug.push(c.to_ascii_lowercase());
        }
    }
    slug
}

/// Join segments into a slug, skipping missing and empty ones.
///
/// ```
/// use shelf_catalog::slug::{build_slug, SlugSegment};
///
/// let slug = build_slug([
///     SlugSegment::from("Logitech"),
///     SlugSegment::from("MX Keys (Black)"),
///     SlugSegment::from(42_i64),
/// ]);
/// assert_eq!(slug, "logitech-mx-keys-black-42");
/// ```
pub fn build_slug<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = SlugSegment<'a>>,
{
    segments
        .into_iter()
        .map(|segment| match segment {
            SlugSegment::Text(text) => text.map(sanitize_slug_segment).unwrap_or_default(),
            SlugSegment::Number(n) => n.map(|n| n.to_string()).unwrap_or_default(),
        })
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Page path of a product: `/product/{brand}-{name}-{id}`.
pub fn product_path(product: &Product) -> String {
    format!(
        "/product/{}",
        build_slug([
            SlugSegment::Text(product.brand_name.as_deref()),
            SlugSegment::Text(Some(product.name.as_str())),
            SlugSegment::Number(Some(product.id)),
        ])
    )
}

/// The id carried by the last `-` separated segment of a route parameter.
///
/// ```
/// use shelf_catalog::slug::trailing_id;
///
/// assert_eq!(trailing_id("logitech-12"), Some("12"));
/// assert_eq!(trailing_id("logitech-"), None);
/// ```
pub fn trailing_id(param: &str) -> Option<&str> {
    param.rsplit('-').next().filter(|id| !id.is_empty())
}

/// Resize/crop options appended to SEO image URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTransform {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<String>,
}

impl ImageTransform {
    /// Square transform, as used by product cards.
    pub fn square(size: u32, crop: impl Into<String>) -> Self {
        Self {
            width: Some(size),
            height: Some(size),
            crop: Some(crop.into()),
        }
    }

    /// The `?tr=` query string, or an empty string when nothing is set.
    pub fn to_query(&self) -> String {
        let mut parts = Vec::new();
        if let Some(width) = self.width.filter(|w| *w > 0) {
            parts.push(format!("w-{}", width));
        }
        if let Some(height) = self.height.filter(|h| *h > 0) {
            parts.push(format!("h-{}", height));
        }
        if let Some(crop) = self.crop.as_deref().filter(|c| !c.is_empty()) {
            parts.push(format!("c-{}", crop));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!("?tr={}", parts.join(","))
        }
    }
}

/// Builds image CDN URLs that carry the product name for SEO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    pub base_url: String,
    pub fallback_url: String,
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_BASE_URL, DEFAULT_FALLBACK_IMAGE_URL)
    }
}

impl ImageUrls {
    pub fn new(base_url: impl Into<String>, fallback_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            fallback_url: fallback_url.into(),
        }
    }

    /// Image URL with an optional transform.
    pub fn seo_url(&self, images: Option<&str>, name: Option<&str>, transform: &ImageTransform) -> String {
        match self.named_path(images, name) {
            Some(path) => format!("{}/{}{}", self.base_url, path, transform.to_query()),
            None => self.fallback_url.clone(),
        }
    }

    /// Image URL without a transform, as used in social meta tags.
    pub fn raw_url(&self, images: Option<&str>, name: Option<&str>) -> String {
        match self.named_path(images, name) {
            Some(path) => format!("{}/{}", self.base_url, path),
            None => self.fallback_url.clone(),
        }
    }

    /// Card image of a product.
    pub fn product_card(&self, product: &Product, size: u32) -> String {
        self.seo_url(
            product.images.as_deref(),
            Some(product.name.as_str()),
            &ImageTransform::square(size, "at_max"),
        )
    }

    fn named_path(&self, images: Option<&str>, name: Option<&str>) -> Option<String> {
        let primary = images?.split(',').map(str::trim).find(|path| !path.is_empty())?;

        let name = name.map(sanitize_slug_segment).unwrap_or_default();
        let name = if name.is_empty() { "image" } else { name.as_str() };

        Some(insert_name_folder(primary, name))
    }
}

/// Turn the file stem into a folder holding `name`: `a/b.png` -> `a/b/name.png`.
/// Paths without an extension get the name appended instead.
fn insert_name_folder(path: &str, name: &str) -> String {
    if !path.contains('.') {
        return format!("{}/{}", path, name);
    }

    match path.rfind('.') {
        Some(dot) if dot + 1 < path.len() => {
            format!("{}/{}.{}", &path[..dot], name, &path[dot + 1..])
        }
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_slug_segment() {
        assert_eq!(sanitize_slug_segment("  MX Keys  (Black) "), "mx-keys-black");
        assert_eq!(sanitize_slug_segment("USB-C -- Hub"), "usb-c-hub");
        assert_eq!(sanitize_slug_segment("Café 2.0"), "cafe-20");
        assert_eq!(sanitize_slug_segment("Cafe\u{301} Crème"), "cafe-creme");
        assert_eq!(sanitize_slug_segment("ﬁber Ｘ"), "fiber-x");
        assert_eq!(sanitize_slug_segment("!!!"), "");
    }

    #[test]
    fn test_build_slug_skips_missing() {
        let slug = build_slug([
            SlugSegment::Text(None),
            SlugSegment::from("Mouse"),
            SlugSegment::Number(None),
            SlugSegment::from("***"),
            SlugSegment::from(7_i64),
        ]);
        assert_eq!(slug, "mouse-7");
    }

    #[test]
    fn test_product_path() {
        let mut product = Product::new(31, "G Pro X");
        product.brand_name = Some("Logitech".to_string());
        assert_eq!(product_path(&product), "/product/logitech-g-pro-x-31");
    }

    #[test]
    fn test_trailing_id() {
        assert_eq!(trailing_id("12"), Some("12"));
        assert_eq!(trailing_id("asus-rog-5"), Some("5"));
        assert_eq!(trailing_id(""), None);
    }

    #[test]
    fn test_seo_url() {
        let urls = ImageUrls::default();
        let url = urls.seo_url(
            Some(" , products/mouse.png, products/alt.png"),
            Some("G Pro X"),
            &ImageTransform::square(300, "at_max"),
        );
        assert_eq!(
            url,
            "https://ik.imagekit.io/botracomputer/ik-seo/products/mouse/g-pro-x.png?tr=w-300,h-300,c-at_max"
        );
    }

    #[test]
    fn test_raw_url_without_extension_or_name() {
        let urls = ImageUrls::new("https://cdn.test", "https://cdn.test/logo.png");
        assert_eq!(urls.raw_url(Some("folder/file"), None), "https://cdn.test/folder/file/image");
        assert_eq!(urls.raw_url(None, Some("Mouse")), "https://cdn.test/logo.png");
        assert_eq!(urls.raw_url(Some(" , "), Some("Mouse")), "https://cdn.test/logo.png");
    }

    #[test]
    fn test_transform_query() {
        assert_eq!(ImageTransform::default().to_query(), "");
        let transform = ImageTransform {
            width: Some(500),
            ..Default::default()
        };
        assert_eq!(transform.to_query(), "?tr=w-500");
    }

    #[test]
    fn test_insert_name_folder() {
        assert_eq!(insert_name_folder("a/b.png", "n"), "a/b/n.png");
        assert_eq!(insert_name_folder("a/b.c.png", "n"), "a/b.c/n.png");
        assert_eq!(insert_name_folder("a/b.", "n"), "a/b.");
    }
}
