//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context as _, Result};
use shelf_catalog::Product;
use shelf_data::{decode_products, StorefrontConfig};
use tracing::info;

use crate::output::Output;

/// Config file names searched for, in order, from the working directory upwards.
const CONFIG_NAMES: [&str; 3] = ["shelf.toml", ".shelf.toml", "shelf.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration.
    pub config: StorefrontConfig,
    /// Output handler.
    pub output: Output,
    /// Product data file given with `--products`.
    pub products_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        products_path: Option<&str>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = match config_path {
            Some(path) => StorefrontConfig::load(path)?,
            None => match find_config(&cwd) {
                Some(path) => {
                    output.debug(&format!("Using config {}", path.display()));
                    StorefrontConfig::load(&path)?
                }
                None => StorefrontConfig::default(),
            },
        };

        let products_path = products_path.map(|path| resolve_path(&cwd, path));

        Ok(Self {
            config,
            output,
            products_path,
        })
    }

    /// Read the product file given with `--products`.
    pub fn products(&self) -> Result<Vec<Product>> {
        let Some(path) = &self.products_path else {
            bail!("No product data: pass --products <file.json>");
        };

        let body = std::fs::read(path)
            .with_context(|| format!("Failed to read products file: {}", path.display()))?;
        let products = decode_products(&body)
            .with_context(|| format!("Failed to parse products file: {}", path.display()))?;

        info!(count = products.len(), path = %path.display(), "loaded product file");
        Ok(products)
    }
}

/// Find the nearest config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Resolve a path relative to the working directory.
fn resolve_path(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        let cwd = Path::new("/work");
        assert_eq!(resolve_path(cwd, "data/p.json"), PathBuf::from("/work/data/p.json"));
        assert_eq!(resolve_path(cwd, "/abs/p.json"), PathBuf::from("/abs/p.json"));
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = std::env::temp_dir().join(format!("shelf-cli-config-{}", std::process::id()));
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join("shelf.toml"), "[cache]\nttl_secs = 5\n").unwrap();

        assert_eq!(find_config(&nested), Some(root.join("shelf.toml")));

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_missing_products_flag() {
        let ctx = Context {
            config: StorefrontConfig::default(),
            output: Output::new(false, true),
            products_path: None,
        };
        let err = ctx.products().unwrap_err();
        assert!(err.to_string().contains("--products"));
    }
}
