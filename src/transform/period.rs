//! Free-text period fields → day counts.
//!
//! The spreadsheet writes rotation and orbital periods as prose:
//! `"24 часа"`, `"365.25 дней"`, `"1 год"`, `"9.9 часов"`. This module
//! extracts the leading numeric value and converts it to days from the
//! unit word found in the text.
//!
//! Unit keywords are substring tests over the whole text, checked in a
//! fixed priority order: hours, days, years, months. The marker set is
//! restricted to multi-letter words; see [`crate::tables`] for why the
//! source's single-letter abbreviations are excluded.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tables::{
    DAYS_PER_MONTH, DAYS_PER_YEAR, DAY_MARKERS, HOURS_PER_DAY, HOUR_MARKERS, MONTH_MARKERS,
    YEAR_MARKERS,
};

/// First maximal decimal-number substring: digits with at most one decimal
/// separator. Russian sources write decimal commas, so both are accepted.
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)?").expect("valid regex"));

/// Parse a free-text period into a day count.
///
/// Returns `None` when the text is blank or contains no numeric substring.
/// Text with a number but no recognized unit word is assumed to already be
/// in days.
pub fn parse_period(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let value: f64 = NUMBER_RE
        .find(text)?
        .as_str()
        .replace(',', ".")
        .parse()
        .ok()?;

    Some(convert_to_days(value, text))
}

/// Apply the first matching unit class, in priority order.
fn convert_to_days(value: f64, text: &str) -> f64 {
    if contains_any(text, HOUR_MARKERS) {
        value / HOURS_PER_DAY
    } else if contains_any(text, DAY_MARKERS) {
        value
    } else if contains_any(text, YEAR_MARKERS) {
        value * DAYS_PER_YEAR
    } else if contains_any(text, MONTH_MARKERS) {
        value * DAYS_PER_MONTH
    } else {
        value
    }
}

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| text.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours() {
        assert_eq!(parse_period("24 часа"), Some(1.0));
        assert_eq!(parse_period("9.9 часов"), Some(9.9 / 24.0));
    }

    #[test]
    fn test_days() {
        assert_eq!(parse_period("365.25 дней"), Some(365.25));
        assert_eq!(parse_period("24.6 суток"), Some(24.6));
        assert_eq!(parse_period("687 дней"), Some(687.0));
    }

    #[test]
    fn test_years() {
        assert_eq!(parse_period("1 год"), Some(365.25));
        assert_eq!(parse_period("11.86 лет"), Some(11.86 * 365.25));
    }

    #[test]
    fn test_months() {
        assert_eq!(parse_period("1 месяц"), Some(30.44));
    }

    #[test]
    fn test_blank_is_absent() {
        assert_eq!(parse_period(""), None);
        assert_eq!(parse_period("   "), None);
    }

    #[test]
    fn test_no_number_is_absent() {
        assert_eq!(parse_period("синхронное вращение"), None);
    }

    #[test]
    fn test_bare_number_assumed_days() {
        assert_eq!(parse_period("27.3"), Some(27.3));
    }

    #[test]
    fn test_decimal_comma() {
        assert_eq!(parse_period("1,5 года"), Some(1.5 * 365.25));
    }

    #[test]
    fn test_first_number_wins() {
        // Only the leading value is read; the rest of the text sets the unit.
        assert_eq!(parse_period("24 часа 37 минут"), Some(1.0));
    }

    #[test]
    fn test_year_word_not_misread_as_days() {
        // "год" contains the letter "д"; the marker set must not classify
        // it as a day-valued period.
        assert_eq!(parse_period("2 года"), Some(2.0 * 365.25));
    }
}
