//! Build a URL slug from free-text segments.

use anyhow::Result;
use shelf_catalog::slug::{build_slug, SlugSegment};

use super::SlugArgs;
use crate::context::Context;

/// Run the slug command.
pub async fn run(args: SlugArgs, ctx: &Context) -> Result<()> {
    let slug = build_slug(
        args.segments
            .iter()
            .map(|segment| SlugSegment::Text(Some(segment.as_str()))),
    );

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "slug": slug }));
    } else {
        println!("{}", slug);
    }
    Ok(())
}
