//! Print the effective configuration.

use anyhow::{Context as _, Result};

use crate::context::Context;

/// Run the config command.
pub async fn run(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let text = ctx
        .config
        .to_toml_string()
        .context("Failed to render config as TOML")?;
    print!("{}", text);
    Ok(())
}
