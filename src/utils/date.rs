//! Frontmatter date parsing and feed date formatting.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Parse a frontmatter date.
///
/// Accepted forms:
/// - `YYYY-MM-DD`
/// - `YYYY-MM-DD HH:MM[:SS]` and `YYYY-MM-DDTHH:MM[:SS]` (taken as UTC)
/// - RFC 3339 with offset (`2025-01-15T08:30:00+02:00`), converted to UTC
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    if let Some(dt) = FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt);
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// RFC 2822 form used in RSS `<pubDate>`: `Wed, 15 Jan 2025 00:00:00 GMT`
pub fn to_rfc2822(dt: NaiveDateTime) -> String {
    dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// RFC 3339 form used in Atom `<updated>`: `2025-01-15T00:00:00Z`
pub fn to_rfc3339(dt: NaiveDateTime) -> String {
    dt.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_parse_date_only() {
        assert_eq!(parse_date("2025-01-15"), Some(ymd_hms(2025, 1, 15, 0, 0, 0)));
        assert_eq!(parse_date(" 2024-02-29 "), Some(ymd_hms(2024, 2, 29, 0, 0, 0)));
    }

    #[test]
    fn test_parse_date_time() {
        assert_eq!(
            parse_date("2025-01-15 08:30:05"),
            Some(ymd_hms(2025, 1, 15, 8, 30, 5))
        );
        assert_eq!(
            parse_date("2025-01-15T08:30"),
            Some(ymd_hms(2025, 1, 15, 8, 30, 0))
        );
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        assert_eq!(
            parse_date("2025-01-15T08:30:00+02:00"),
            Some(ymd_hms(2025, 1, 15, 6, 30, 0))
        );
        assert_eq!(
            parse_date("2024-01-01T00:00:00Z"),
            Some(ymd_hms(2024, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_parse_invalid_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("2025-13-01"), None);
        assert_eq!(parse_date("2025/01/15"), None);
    }

    #[test]
    fn test_to_rfc2822() {
        assert_eq!(
            to_rfc2822(ymd_hms(2025, 1, 15, 0, 0, 0)),
            "Wed, 15 Jan 2025 00:00:00 GMT"
        );
    }

    #[test]
    fn test_to_rfc3339() {
        assert_eq!(
            to_rfc3339(ymd_hms(2025, 1, 15, 8, 30, 0)),
            "2025-01-15T08:30:00Z"
        );
    }
}
