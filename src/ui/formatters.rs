use colored::{ColoredString, Colorize};

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;
const TB: f64 = GB * 1024.0;

/// Format a byte count in human-readable form (B, KB, MB, GB, TB)
pub fn format_size(size: u64) -> String {
    let bytes = size as f64;
    if size < 1024 {
        format!("{}B", size)
    } else if bytes < MB {
        format!("{:.1}KB", bytes / KB)
    } else if bytes < GB {
        format!("{:.1}MB", bytes / MB)
    } else if bytes < TB {
        format!("{:.1}GB", bytes / GB)
    } else {
        format!("{:.2}TB", bytes / TB)
    }
}

/// Bytes per second
pub fn format_speed(bytes_per_sec: u64) -> String {
    format!("{}/s", format_size(bytes_per_sec))
}

pub fn format_mb(mb: f64) -> String {
    if mb >= 1024.0 {
        format!("{:.2}GB", mb / 1024.0)
    } else {
        format!("{:.1}MB", mb)
    }
}

/// Percentage colored by load: green below 60, yellow below 85, red above
pub fn format_percent(percent: f64) -> ColoredString {
    let text = format!("{:5.1}%", percent);
    if percent < 60.0 {
        text.green()
    } else if percent < 85.0 {
        text.yellow()
    } else {
        text.red().bold()
    }
}

/// Fixed-width usage bar, e.g. `[######----]`
pub fn usage_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Shorten `text` to `max` chars, marking the cut with `~`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('~');
    out
}
