// Single-line progress display

use colored::Colorize;
use std::io::{self, Write};

const BAR_WIDTH: usize = 30;

/// Percentage and bar fill for `processed` of `total`
fn progress_parts(processed: usize, total: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    let ratio = (processed.min(total) as f64) / total as f64;
    ((ratio * 100.0) as usize, (ratio * BAR_WIDTH as f64) as usize)
}

/// Redraw the progress line in place
pub fn show_progress_bar(processed: usize, total: usize, prefix: &str) {
    let (percentage, filled) = progress_parts(processed, total);
    print!(
        "\r{} [{}{}] {}% ({}/{}) ",
        prefix.white(),
        "=".repeat(filled).green(),
        " ".repeat(BAR_WIDTH - filled),
        percentage,
        processed,
        total
    );
    io::stdout().flush().ok();
}

/// Clear the progress line
pub fn clear_line() {
    print!("\r{}\r", " ".repeat(BAR_WIDTH + 40));
    io::stdout().flush().ok();
}
