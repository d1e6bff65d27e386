//! Date Formatting
//!
//! Long-form dates for event pages, in the participant's language.

use chrono::{DateTime, Datelike, NaiveDate};

const EN_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

// Genitive forms, as used after a day number
const PL_MONTHS: [&str; 12] = [
    "stycznia",
    "lutego",
    "marca",
    "kwietnia",
    "maja",
    "czerwca",
    "lipca",
    "sierpnia",
    "września",
    "października",
    "listopada",
    "grudnia",
];

/// Parse a `YYYY-MM-DD` date or an RFC 3339 timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

/// Format a date as `December 24, 2025` (`en`) or `24 grudnia 2025` (`pl`).
///
/// Missing or unparseable input yields `empty`. Unknown locales get the
/// English form.
pub fn format_date_long(value: Option<&str>, locale: &str, empty: &str) -> String {
    let Some(date) = value.filter(|v| !v.is_empty()).and_then(parse_date) else {
        return empty.to_string();
    };

    let month = date.month0() as usize;
    match locale {
        "pl" | "pl-PL" => format!("{} {} {}", date.day(), PL_MONTHS[month], date.year()),
        _ => format!("{} {}, {}", EN_MONTHS[month], date.day(), date.year()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_english() {
        assert_eq!(
            format_date_long(Some("2025-12-24"), "en", ""),
            "December 24, 2025"
        );
    }

    #[test]
    fn test_format_polish() {
        assert_eq!(
            format_date_long(Some("2025-12-24"), "pl", ""),
            "24 grudnia 2025"
        );
        assert_eq!(
            format_date_long(Some("2026-09-01"), "pl", ""),
            "1 września 2026"
        );
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_date_long(Some("2025-12-10T18:00:00+00:00"), "en", ""),
            "December 10, 2025"
        );
    }

    #[test]
    fn test_empty_and_invalid_input() {
        assert_eq!(format_date_long(None, "en", "TBD"), "TBD");
        assert_eq!(format_date_long(Some(""), "en", "TBD"), "TBD");
        assert_eq!(format_date_long(Some("not a date"), "pl", "-"), "-");
    }

    #[test]
    fn test_unknown_locale_uses_english() {
        assert_eq!(
            format_date_long(Some("2025-01-05"), "de", ""),
            "January 5, 2025"
        );
    }
}
