//! List the facet values of a product file.

use anyhow::Result;
use shelf_catalog::{derive_facets, Dimension, Facet};

use super::{FacetsArgs, KindArg};
use crate::context::Context;
use crate::output::format_price;

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let products = ctx.products()?;
    let facets = derive_facets(&products);

    if ctx.output.is_json() {
        ctx.output.json(&facets);
        return Ok(());
    }

    let dimensions: &[Dimension] = match args.only {
        Some(KindArg::Brand) => &[Dimension::Brand],
        Some(KindArg::Category) => &[Dimension::Category],
        None => &[Dimension::Brand, Dimension::Category],
    };

    for &dimension in dimensions {
        print_facets(ctx, dimension, facets.facets(dimension));
    }

    ctx.output.header("Price");
    ctx.output.kv("min", &format_price(facets.price_bounds.min));
    ctx.output.kv("max", &format_price(facets.price_bounds.max));

    Ok(())
}

fn print_facets(ctx: &Context, dimension: Dimension, facets: &[Facet]) {
    let title = match dimension {
        Dimension::Brand => "Brands",
        Dimension::Category => "Categories",
    };
    ctx.output.header(&format!("{} ({})", title, facets.len()));

    if facets.is_empty() {
        ctx.output.info("No values.");
        return;
    }
    for facet in facets {
        ctx.output.list_item(&format!("{}  {}", facet.label, facet.id));
    }
}
