use chrono::{Duration, NaiveDateTime};

/// Shown when an event family has no records yet
pub const NEVER: &str = "never";

/// Human "time since" string: `just now`, `N min ago`, `N h M min ago`, `N d H h ago`.
///
/// Negative durations (clock moved backwards) read as `just now`.
pub fn format_ago(elapsed: Duration) -> String {
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "just now".to_string();
    }

    let days = minutes / (24 * 60);
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;

    if days > 0 {
        format!("{} d {} h ago", days, hours)
    } else if hours > 0 {
        format!("{} h {} min ago", hours, mins)
    } else {
        format!("{} min ago", mins)
    }
}

/// `format_ago` between a stored `YYYY-MM-DD HH:MM:SS` stamp and `now`
pub fn ago_since(stamp: &str, now: NaiveDateTime) -> String {
    match NaiveDateTime::parse_from_str(stamp, super::STAMP_FORMAT) {
        Ok(at) => format_ago(now - at),
        Err(_) => NEVER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ago_ranges() {
        assert_eq!(format_ago(Duration::seconds(30)), "just now");
        assert_eq!(format_ago(Duration::seconds(-90)), "just now");
        assert_eq!(format_ago(Duration::minutes(5)), "5 min ago");
        assert_eq!(format_ago(Duration::minutes(125)), "2 h 5 min ago");
        assert_eq!(format_ago(Duration::hours(27)), "1 d 3 h ago");
    }

    #[test]
    fn test_ago_since_unparseable_stamp() {
        let now = NaiveDateTime::parse_from_str("2025-01-01 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(ago_since("garbage", now), NEVER);
        assert_eq!(ago_since("2024-12-31 23:50:00", now), "10 min ago");
    }
}
