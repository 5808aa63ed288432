//! Relative timestamps for the activity feed ("3 hours ago").

use chrono::{DateTime, Utc};

const UNITS: [(&str, i64); 6] = [
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
];

/// Human-readable distance from `then` to `now`.
///
/// Anything under ten seconds, or in the future (clock skew), is "Just now".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 10 {
        return "Just now".to_string();
    }
    if seconds < 60 {
        return format!("{} seconds ago", seconds);
    }
    UNITS
        .iter()
        .find_map(|(label, size)| {
            let count = seconds / size;
            (count >= 1).then(|| {
                format!("{} {}{} ago", count, label, if count == 1 { "" } else { "s" })
            })
        })
        .unwrap_or_else(|| "Just now".to_string())
}

pub fn time_ago_from_now(then: DateTime<Utc>) -> String {
    time_ago(then, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ago(seconds: i64) -> String {
        time_ago(now() - Duration::seconds(seconds), now())
    }

    #[test]
    fn test_recent_and_future() {
        assert_eq!(ago(0), "Just now");
        assert_eq!(ago(9), "Just now");
        assert_eq!(ago(-120), "Just now");
    }

    #[test]
    fn test_seconds() {
        assert_eq!(ago(10), "10 seconds ago");
        assert_eq!(ago(59), "59 seconds ago");
    }

    #[test]
    fn test_largest_unit_with_plural() {
        assert_eq!(ago(60), "1 minute ago");
        assert_eq!(ago(150), "2 minutes ago");
        assert_eq!(ago(3_600), "1 hour ago");
        assert_eq!(ago(86_400 * 3), "3 days ago");
        assert_eq!(ago(604_800 * 2), "2 weeks ago");
        assert_eq!(ago(2_592_000), "1 month ago");
        assert_eq!(ago(31_536_000 * 2 + 5), "2 years ago");
    }
}
