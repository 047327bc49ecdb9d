//! Resources as the REST API serves them.
//!
//! Field names follow the API's JSON. Optional and server-computed fields
//! default when absent so that older or partial payloads still decode.

pub mod auth;
pub mod client;
pub mod company;
pub mod document;
pub mod schema;
pub mod template;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Renders an API timestamp as `YYYY-MM-DD`.
///
/// The API emits naive ISO timestamps (`2026-01-31T09:15:00.123456`), but
/// RFC 3339 values and bare dates are accepted too. Anything unparseable is
/// returned unchanged.
pub fn display_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::display_date;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("2026-01-31T09:15:00.123456", "2026-01-31")]
    #[case("2026-01-31T09:15:00", "2026-01-31")]
    #[case("2026-01-31T23:15:00+00:00", "2026-01-31")]
    #[case("2026-01-31", "2026-01-31")]
    #[case("yesterday", "yesterday")]
    fn formats_api_timestamps(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(display_date(raw), expected);
    }
}
