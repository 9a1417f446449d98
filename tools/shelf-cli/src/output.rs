//! Output formatting for the CLI.

use console::style;
use shelf_catalog::Product;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print a table of products.
    pub fn product_table(&self, products: &[Product]) {
        const WIDTHS: [usize; 5] = [6, 32, 16, 10, 14];

        self.table_row(&["ID", "NAME", "BRAND", "PRICE", "BADGE"], &WIDTHS);
        for product in products {
            let id = product.id.to_string();
            let price = format_price(product.effective_price());
            let badge = product.badge().map(|b| b.text).unwrap_or_default();
            self.table_row(
                &[
                    &id,
                    &truncate(&product.name, WIDTHS[1]),
                    product.brand_name.as_deref().unwrap_or("-"),
                    &price,
                    &stock_badge(product, &badge),
                ],
                &WIDTHS,
            );
        }
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Format a price with two decimals.
pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

fn stock_badge(product: &Product, badge: &str) -> String {
    let label = stock_label(product, badge);
    if !product.is_in_stock() {
        style(label).red().to_string()
    } else if badge.is_empty() {
        style(label).green().to_string()
    } else {
        style(label).yellow().to_string()
    }
}

/// Text of the badge column. Never empty.
fn stock_label<'a>(product: &Product, badge: &'a str) -> &'a str {
    if !badge.is_empty() {
        badge
    } else if product.is_in_stock() {
        "in stock"
    } else {
        "out of stock"
    }
}

/// Shorten `text` to `max` characters, marking the cut with `…`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
