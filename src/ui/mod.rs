// Terminal output helpers

pub mod formatters;
pub mod progress;

pub use formatters::{format_mb, format_percent, format_size, format_speed, truncate, usage_bar};
pub use progress::{clear_line, show_progress_bar};
