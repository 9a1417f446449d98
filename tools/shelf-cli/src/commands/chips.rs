//! Show the active-filter chips and count for a filter state.

use anyhow::{bail, Result};
use serde::Serialize;
use shelf_catalog::{
    active_filter_count, derive_chips, derive_facets, remove_chip, FilterChip, FilterState,
};

use super::ChipsArgs;
use crate::context::Context;

#[derive(Serialize)]
struct ChipReport {
    count: usize,
    chips: Vec<FilterChip>,
}

/// Run the chips command.
pub async fn run(args: ChipsArgs, ctx: &Context) -> Result<()> {
    // Without a product file, chips fall back to "Brand {id}" style labels.
    let products = match ctx.products_path {
        Some(_) => ctx.products()?,
        None => Vec::new(),
    };
    let facets = derive_facets(&products);
    let (brands, categories) = (facets.brand_lookup(), facets.category_lookup());
    let toggles = args.toggles();

    let mut state = args.state.to_state();
    let derive = |state: &FilterState| derive_chips(state, &brands, &categories, toggles);

    if let Some(key) = &args.remove {
        let Some(chip) = derive(&state).into_iter().find(|chip| &chip.key() == key) else {
            bail!("No active chip with key `{}`", key);
        };
        state = remove_chip(&state, &chip);
        ctx.output.debug(&format!("Removed chip {}", key));
    }

    let report = ChipReport {
        count: active_filter_count(&state, toggles),
        chips: derive(&state),
    };

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    ctx.output.header(&format!("Active filters ({})", report.count));
    if report.chips.is_empty() {
        ctx.output.info("No active filters.");
    }
    for chip in &report.chips {
        ctx.output
            .kv(&chip.key(), &chip.display_label(facets.price_bounds));
    }

    Ok(())
}
