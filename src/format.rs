use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime};

/// Slot used when the user id is absent or carries no digit at the probed
/// position. The palette has 11 slots, 0 through 10.
pub const FALLBACK_AVATAR_SLOT: usize = 10;

/// Parse an API timestamp. The dev API serves RFC 3339 strings; a
/// space-separated variant shows up in older payloads.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(ts).ok().or_else(|| {
        NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc().fixed_offset())
    })
}

/// Pick an avatar palette slot from the digit at position 3 of the decimal
/// form of the id. Ids that are absent or shorter than four digits land on the
/// fallback slot. Collisions are expected; this is display-only.
pub fn avatar_color_index(user_id: Option<i64>) -> usize {
    let Some(id) = user_id else {
        return FALLBACK_AVATAR_SLOT;
    };
    id.to_string()
        .chars()
        .nth(3)
        .and_then(|c| c.to_digit(10))
        .map(|d| d as usize)
        .unwrap_or(FALLBACK_AVATAR_SLOT)
}

/// First letter of every whitespace-separated name part, uppercased.
pub fn initials(name: Option<&str>) -> String {
    let parts: String = name
        .unwrap_or("")
        .split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect();
    if parts.is_empty() { "U".to_string() } else { parts }
}

/// Sidebar timestamp: time-of-day today, short month/day this year, bare year
/// otherwise. Unparseable input renders as-is.
pub fn format_relative_date(ts: &str) -> String {
    let Some(parsed) = parse_timestamp(ts) else {
        return ts.to_string();
    };
    let local = parsed.with_timezone(&Local);
    let now = Local::now();
    if local.date_naive() == now.date_naive() {
        local.format("%H:%M").to_string()
    } else if local.year() == now.year() {
        local.format("%b %-d").to_string()
    } else {
        local.format("%Y").to_string()
    }
}

/// Header "last seen" line: time-of-day when today, the calendar date otherwise.
pub fn format_last_seen(ts: &str) -> String {
    let Some(parsed) = parse_timestamp(ts) else {
        return ts.to_string();
    };
    let local = parsed.with_timezone(&Local);
    if local.date_naive() == Local::now().date_naive() {
        local.format("%H:%M").to_string()
    } else {
        local.format("%Y-%m-%d").to_string()
    }
}

/// Date-separator pill text for a `YYYY-MM-DD` bucket key.
pub fn format_day_heading(date_key: &str) -> String {
    let Ok(date) = NaiveDate::parse_from_str(date_key, "%Y-%m-%d") else {
        return date_key.to_string();
    };
    if date == Local::now().date_naive() {
        "Today".to_string()
    } else {
        date.format("%a %b %-d %Y").to_string()
    }
}

/// In-bubble timestamp: time-of-day when the bucket is today, the bucket key otherwise.
pub fn format_bubble_time(ts: &str, date_key: &str) -> String {
    let today = NaiveDate::parse_from_str(date_key, "%Y-%m-%d")
        .map(|date| date == Local::now().date_naive())
        .unwrap_or(false);
    if today {
        parse_timestamp(ts)
            .map(|parsed| parsed.with_timezone(&Local).format("%H:%M").to_string())
            .unwrap_or_else(|| ts.to_string())
    } else {
        date_key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn avatar_slot_uses_fourth_digit() {
        assert_eq!(avatar_color_index(Some(12345678)), 4);
        assert_eq!(avatar_color_index(Some(9990)), 0);
    }

    #[test]
    fn avatar_slot_falls_back_without_fourth_digit() {
        assert_eq!(avatar_color_index(None), FALLBACK_AVATAR_SLOT);
        assert_eq!(avatar_color_index(Some(123)), FALLBACK_AVATAR_SLOT);
        assert_eq!(avatar_color_index(Some(0)), FALLBACK_AVATAR_SLOT);
    }

    #[test]
    fn initials_take_first_letter_of_each_part() {
        assert_eq!(initials(Some("Ada Lovelace")), "AL");
        assert_eq!(initials(Some("grace")), "G");
        assert_eq!(initials(Some("  ")), "U");
        assert_eq!(initials(None), "U");
    }

    #[test]
    fn relative_date_for_now_is_time_of_day() {
        let now = Local::now().to_rfc3339();
        let text = format_relative_date(&now);
        assert_eq!(text.len(), 5, "expected HH:MM, got {text:?}");
        assert_eq!(&text[2..3], ":");
    }

    #[test]
    fn relative_date_for_prior_year_is_bare_year() {
        assert_eq!(format_relative_date("2021-06-15T12:00:00Z"), "2021");
    }

    #[test]
    fn relative_date_within_year_is_month_and_day() {
        let recent = Local::now() - Duration::days(2);
        if recent.year() != Local::now().year() {
            // two days ago crosses the year boundary today; nothing to assert
            return;
        }
        let text = format_relative_date(&recent.to_rfc3339());
        assert!(!text.contains(':'), "expected month/day, got {text:?}");
        assert_ne!(text, recent.year().to_string());
    }

    #[test]
    fn day_heading_for_today_and_past() {
        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(format_day_heading(&today), "Today");
        assert_eq!(format_day_heading("2024-01-02"), "Tue Jan 2 2024");
    }

    #[test]
    fn bubble_time_uses_bucket_key_for_past_days() {
        assert_eq!(format_bubble_time("2024-01-02T10:00:00Z", "2024-01-02"), "2024-01-02");
    }

    #[test]
    fn parse_timestamp_accepts_both_wire_shapes() {
        assert!(parse_timestamp("2024-01-31T06:27:29.000000Z").is_some());
        assert!(parse_timestamp("2024-01-31 06:27:29").is_some());
        assert!(parse_timestamp("not a date").is_none());
    }
}
