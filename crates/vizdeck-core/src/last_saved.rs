//! "updated 3 days ago by Jane" lines for the editor header.

use chrono::{DateTime, Utc};

use crate::graphic::Record;
use crate::screen::{Screen, Tier};
use crate::users::User;

/// Saves performed by the server-side function editor carry this sentinel
/// instead of a username.
const FUNCTION_EDITOR_SENTINEL: &str = "function-editor";

/// Relative time in the style the dashboard always used ("a few seconds
/// ago", "3 days ago"). Timestamps in the future clamp to "a few seconds
/// ago".
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    if seconds <= 44 {
        return "a few seconds ago".to_string();
    }
    if seconds <= 89 {
        return "a minute ago".to_string();
    }
    let minutes = (seconds as f64 / 60.0).round() as i64;
    if minutes <= 44 {
        return format!("{minutes} minutes ago");
    }
    if minutes <= 89 {
        return "an hour ago".to_string();
    }
    let hours = (minutes as f64 / 60.0).round() as i64;
    if hours <= 21 {
        return format!("{hours} hours ago");
    }
    let days = (hours as f64 / 24.0).round() as i64;
    if days == 1 {
        return "a day ago".to_string();
    }
    if days <= 25 {
        return format!("{days} days ago");
    }
    let months = (days as f64 / 30.0).round() as i64;
    if months == 1 {
        return "a month ago".to_string();
    }
    if months <= 10 {
        return format!("{months} months ago");
    }
    let years = (days as f64 / 365.0).round() as i64;
    if years <= 1 {
        return "a year ago".to_string();
    }
    format!("{years} years ago")
}

fn saved_by_text(saved_by: &str, users: &[User]) -> String {
    if saved_by.is_empty() {
        return String::new();
    }
    if saved_by == FUNCTION_EDITOR_SENTINEL {
        return "Function Editor".to_string();
    }
    users
        .iter()
        .find(|user| user.username == saved_by)
        .map(|user| user.display_name().to_string())
        .unwrap_or_else(|| saved_by.to_string())
}

/// The header line for a screen's slot at a tier: "updated <when> by <who>",
/// with either part dropped when not recorded, and "" when neither is.
pub fn last_update_text(
    record: &Record,
    screen: Screen,
    tier: Tier,
    users: &[User],
    now: DateTime<Utc>,
) -> String {
    let Some(update_key) = screen.last_update_key(tier) else {
        return String::new();
    };
    let Some(by_key) = screen.last_saved_by_key(tier) else {
        return String::new();
    };

    let time_text = record
        .get_str(&update_key)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|timestamp| relative_time(timestamp.with_timezone(&Utc), now))
        .unwrap_or_default();
    let by_text = record
        .get_str(&by_key)
        .map(|raw| saved_by_text(raw, users))
        .unwrap_or_default();

    let mut parts = Vec::new();
    if !time_text.is_empty() {
        parts.push(time_text);
    }
    if !by_text.is_empty() {
        parts.push(format!("by {by_text}"));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("updated {}", parts.join(" "))
    }
}
