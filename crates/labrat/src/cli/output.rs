//! Output formatting utilities for CLI commands

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

/// Build a table with the house style: condensed UTF-8 borders, dynamic
/// column widths.
pub fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)));
    table
}

/// Print an error as a JSON object on stdout (for `--json` consumers).
pub fn print_json_error(err: &anyhow::Error) {
    let payload = serde_json::json!({
        "status": "error",
        "error": format!("{:#}", err),
    });
    println!("{}", payload);
}

/// Resolve the acting user for metadata records: explicit flag first,
/// then the login environment, then a fixed fallback.
pub fn resolve_owner(explicit: Option<String>) -> String {
    explicit.unwrap_or_else(|| {
        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "unknown".to_string())
    })
}
