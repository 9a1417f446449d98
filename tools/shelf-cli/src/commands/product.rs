//! Show a single product page.

use std::sync::Arc;

use anyhow::{bail, Result};
use shelf_cache::MemoryCache;
use shelf_catalog::slug::{product_path, trailing_id};
use shelf_data::{InMemorySource, ListingLoader};

use super::ProductArgs;
use crate::context::Context;
use crate::output::format_price;

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let source = Arc::new(InMemorySource::from_products(ctx.products()?));
    let loader = ListingLoader::new(source, Arc::new(MemoryCache::default()));
    if let Some(id) = trailing_id(&args.param) {
        ctx.output
            .debug(&format!("Upstream {}", ctx.config.api.product_url(id)));
    }

    let Some(product) = loader.load_product(&args.param).await else {
        bail!("Product unavailable: {}", args.param);
    };

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    let urls = ctx.config.images.urls();
    ctx.output.header(&product.name);
    ctx.output.kv("path", &product_path(&product));
    ctx.output.kv("brand", &product.brand_key());
    ctx.output.kv("category", &product.category_key());
    ctx.output.kv("price", &format_price(product.effective_price()));
    ctx.output.kv("image", &urls.product_card(&product, args.image_size));
    match product.badge() {
        Some(badge) => ctx.output.kv("badge", &format!("{} ({})", badge.text, badge.color)),
        None => ctx.output.success("In stock"),
    }

    Ok(())
}
