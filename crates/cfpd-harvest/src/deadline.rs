//! Deadline extraction from free text.
//!
//! Provider payloads carry deadlines as natural-language strings in
//! inconsistent shapes ("15 March 2026", "Deadline: 1June 2027", buried in a
//! paragraph). Extraction looks for the first day/month-name/year pattern
//! and maps it through a fixed calendar table.

use chrono::NaiveDate;
use regex::Regex;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Extracts a calendar date from free text, or `None`.
///
/// Matches a 1–2 digit day, optional whitespace, a capitalized English month
/// name, optional whitespace, and a 4-digit year. Only the first match in
/// the text is considered: when a posted date precedes the real deadline the
/// wrong one wins. Known limitation, kept for predictability.
///
/// Returns `None` when nothing matches, when the capitalized word is not a
/// month name, or when the day/month/year combination is not a valid
/// calendar date (e.g. 31 February). Never panics.
#[must_use]
pub fn extract_deadline(text: &str) -> Option<NaiveDate> {
    let pattern =
        Regex::new(r"\b(\d{1,2})\s?([A-Z][a-z]+)\s?(\d{4})\b").expect("valid deadline regex");
    let caps = pattern.captures(text)?;
    let day: u32 = caps[1].parse().ok()?;
    let month = month_ordinal(&caps[2])?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Maps a full English month name to its 1–12 ordinal.
fn month_ordinal(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|month| *month == name)
        .and_then(|index| u32::try_from(index + 1).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn extracts_plain_date() {
        assert_eq!(extract_deadline("15 March 2026"), Some(date(2026, 3, 15)));
    }

    #[test]
    fn extracts_date_from_surrounding_text() {
        assert_eq!(
            extract_deadline("Submissions are welcome until 3 November 2025 at midnight."),
            Some(date(2025, 11, 3))
        );
    }

    #[test]
    fn tolerates_missing_whitespace() {
        assert_eq!(extract_deadline("due 1June 2027"), Some(date(2027, 6, 1)));
    }

    #[test]
    fn invalid_calendar_combination_is_absent() {
        assert_eq!(extract_deadline("Submissions due 31 February 2025"), None);
    }

    #[test]
    fn capitalized_non_month_word_is_absent() {
        assert_eq!(extract_deadline("15 Submissions 2026"), None);
    }

    #[test]
    fn lowercase_month_does_not_match() {
        assert_eq!(extract_deadline("15 march 2026"), None);
    }

    #[test]
    fn empty_text_is_absent() {
        assert_eq!(extract_deadline(""), None);
    }

    #[test]
    fn no_date_in_text_is_absent() {
        assert_eq!(extract_deadline("rolling submissions, no deadline"), None);
    }

    #[test]
    fn first_match_wins_even_when_it_is_not_the_deadline() {
        let text = "Posted 1 January 2025. Deadline 15 March 2026.";
        assert_eq!(extract_deadline(text), Some(date(2025, 1, 1)));
    }

    #[test]
    fn every_month_maps_to_its_ordinal() {
        for (index, month) in MONTHS.iter().enumerate() {
            let text = format!("10 {month} 2026");
            let expected = u32::try_from(index + 1).expect("month ordinal fits u32");
            assert_eq!(extract_deadline(&text), Some(date(2026, expected, 10)));
        }
    }
}
