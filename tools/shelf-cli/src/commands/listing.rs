//! Load a listing page through the cached loader.

use std::sync::Arc;

use anyhow::Result;
use shelf_cache::MemoryCache;
use shelf_catalog::slug::trailing_id;
use shelf_catalog::ListingKind;
use shelf_data::{InMemorySource, ListingLoader, LoadOutcome};

use super::ListingArgs;
use crate::context::Context;

/// Run the listing command.
pub async fn run(args: ListingArgs, ctx: &Context) -> Result<()> {
    let source = Arc::new(InMemorySource::from_products(ctx.products()?));
    let cache = Arc::new(MemoryCache::new(ctx.config.cache.ttl()));
    let loader = ListingLoader::new(source, cache).with_config(&ctx.config.cache);
    let kind = ListingKind::from(args.kind);
    if let Some(id) = trailing_id(&args.param) {
        ctx.output
            .debug(&format!("Upstream {}", ctx.config.api.listing_url(kind, id)));
    }

    let mut outcome = loader.load(kind, &args.param).await;
    for _ in 1..args.repeat {
        outcome = loader.load(kind, &args.param).await;
    }
    ctx.output.debug(&format!("{} cached listing(s)", loader.cache().len()));

    let payload = match outcome {
        LoadOutcome::Redirect { status, location } => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "redirect": { "status": status.as_u16(), "location": location }
                }));
            } else {
                ctx.output
                    .warn(&format!("Redirect {} to {}", status.as_u16(), location));
            }
            return Ok(());
        }
        LoadOutcome::Loaded(payload) => payload,
    };

    if ctx.output.is_json() {
        ctx.output.json(&payload);
        return Ok(());
    }

    let (header, value) = ListingLoader::<InMemorySource>::cache_control();
    ctx.output.kv(header.as_str(), value.to_str().unwrap_or_default());

    if let Some(message) = &payload.message {
        ctx.output.info(message);
        return Ok(());
    }

    let hero = payload.hero.as_ref().and_then(|hero| hero.name.as_deref());
    ctx.output.header(&format!(
        "{} ({} products)",
        hero.unwrap_or(kind.dimension().unknown_label()),
        payload.total_products
    ));
    for group in &payload.groups {
        ctx.output
            .list_item(&format!("{} ({})", group.title, group.products.len()));
    }

    Ok(())
}
