//! Human-friendly rendering of result observation timestamps.

use chrono::{DateTime, Utc};

/// Render `at` relative to `now`. Pure; timestamps at or after `now` render
/// as "just now".
#[must_use]
pub fn friendly(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        return "just now".to_owned();
    }

    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = elapsed.num_days();
    if days < 7 {
        return plural(days, "day");
    }

    at.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Render `at` relative to the current wall clock.
#[must_use]
pub fn friendly_now(at: DateTime<Utc>) -> String {
    friendly(at, Utc::now())
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 8, 12, 0, 0).unwrap()
    }

    #[test]
    fn recent_timestamps_are_just_now() {
        let at = now() - chrono::Duration::seconds(30);
        assert_eq!(friendly(at, now()), "just now");
        // Clock skew: a timestamp slightly in the future is still "just now".
        let at = now() + chrono::Duration::seconds(5);
        assert_eq!(friendly(at, now()), "just now");
    }

    #[test]
    fn minutes_hours_days() {
        assert_eq!(
            friendly(now() - chrono::Duration::minutes(1), now()),
            "1 minute ago"
        );
        assert_eq!(
            friendly(now() - chrono::Duration::minutes(5), now()),
            "5 minutes ago"
        );
        assert_eq!(
            friendly(now() - chrono::Duration::hours(3), now()),
            "3 hours ago"
        );
        assert_eq!(
            friendly(now() - chrono::Duration::days(2), now()),
            "2 days ago"
        );
    }

    #[test]
    fn old_timestamps_render_as_dates() {
        let at = Utc.with_ymd_and_hms(2024, 4, 1, 9, 30, 0).unwrap();
        assert_eq!(friendly(at, now()), "2024-04-01 09:30 UTC");
    }
}
