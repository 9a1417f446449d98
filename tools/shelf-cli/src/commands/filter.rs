//! Filter a product file, flat or grouped as a listing page.

use anyhow::Result;
use shelf_catalog::{apply_filters, build_listing, ListingKind};

use super::FilterArgs;
use crate::context::Context;

/// Run the filter command.
pub async fn run(args: FilterArgs, ctx: &Context) -> Result<()> {
    let products = ctx.products()?;
    let state = args.state.to_state();

    match args.listing {
        None => {
            let visible = apply_filters(&products, &state);
            if ctx.output.is_json() {
                ctx.output.json(&visible);
                return Ok(());
            }

            ctx.output
                .header(&format!("{} of {} products", visible.len(), products.len()));
            ctx.output.product_table(&visible);
        }
        Some(kind) => {
            let kind = ListingKind::from(kind);
            let payload = build_listing(kind, products);
            let groups = payload.filtered(&state);
            if ctx.output.is_json() {
                ctx.output.json(&groups);
                return Ok(());
            }

            if groups.is_empty() {
                ctx.output.warn("No products match the current filters.");
            }
            for group in &groups {
                ctx.output
                    .header(&format!("{} ({})", group.title, group.products.len()));
                ctx.output.product_table(&group.products);
            }
        }
    }

    Ok(())
}
