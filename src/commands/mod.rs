// Command handlers module
pub mod clean;
pub mod disks;
pub mod history;
pub mod info;
pub mod monitor;
pub mod optimize;
pub mod process;
pub mod scan;
pub mod version;

use anyhow::{Context, Result};
use serde::Serialize;

/// Print `value` as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

/// Horizontal rule used between report sections
pub(crate) fn rule() -> String {
    "─".repeat(50)
}
