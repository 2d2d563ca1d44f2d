use chrono::NaiveDate;
use serde::Serialize;

/// Upper bound on `description` length, in characters. Applied at
/// construction; the cut is lossy and irreversible.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// A normalized call-for-papers announcement.
///
/// Produced by one provider source during a single crawl pass. Records carry
/// no identity across passes: every run yields a fresh, independent set, and
/// nothing is deduplicated or persisted.
///
/// The model does not validate usability — consumers expect `provider` plus
/// at least one of `title`/`link` to be non-empty, but enforcement is their
/// concern. `rank` is the only field written after construction, at most
/// once, by the enrichment step.
///
/// Serialization is the sole export contract: dates render as ISO-8601
/// (`YYYY-MM-DD`) and absent optional fields are omitted from the output map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cfp {
    /// Identifier of the source that produced this record.
    pub provider: String,
    /// Target journal/venue name, or a provider-specific placeholder.
    pub journal: String,
    /// Announcement title, or a placeholder.
    pub title: String,
    /// Free text, at most [`MAX_DESCRIPTION_CHARS`] characters.
    pub description: String,
    /// Source publication date. Retained in the model; no current source
    /// populates it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted: Option<NaiveDate>,
    /// Submission deadline, when one could be extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    /// URL of the original announcement; may be empty.
    pub link: String,
    /// SJR quality score, populated only by enrichment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<f64>,
}

impl Cfp {
    /// Builds a record, truncating `description` to [`MAX_DESCRIPTION_CHARS`]
    /// characters. `posted` and `rank` start absent.
    #[must_use]
    pub fn new(
        provider: &str,
        journal: String,
        title: String,
        description: &str,
        deadline: Option<NaiveDate>,
        link: String,
    ) -> Self {
        Self {
            provider: provider.to_owned(),
            journal,
            title,
            description: truncate_chars(description, MAX_DESCRIPTION_CHARS),
            posted: None,
            deadline,
            link,
            rank: None,
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(description: &str, deadline: Option<NaiveDate>) -> Cfp {
        Cfp::new(
            "Elsevier",
            "Food Chemistry".to_owned(),
            "Special Issue on Fermentation".to_owned(),
            description,
            deadline,
            "https://example.com/cfp".to_owned(),
        )
    }

    #[test]
    fn long_description_truncates_to_prefix() {
        let long = "x".repeat(450);
        let record = sample(&long, None);
        assert_eq!(record.description.chars().count(), MAX_DESCRIPTION_CHARS);
        assert!(long.starts_with(&record.description));
    }

    #[test]
    fn short_description_is_kept_verbatim() {
        let record = sample("short text", None);
        assert_eq!(record.description, "short text");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(300);
        let record = sample(&long, None);
        assert_eq!(record.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn serializes_dates_as_iso8601() {
        let record = sample("", NaiveDate::from_ymd_opt(2026, 3, 15));
        let value = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(value["deadline"], "2026-03-15");
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let record = sample("", None);
        let value = serde_json::to_value(&record).expect("record should serialize");
        let map = value.as_object().expect("record serializes to a map");
        assert!(!map.contains_key("deadline"));
        assert!(!map.contains_key("posted"));
        assert!(!map.contains_key("rank"));
        assert!(map.contains_key("link"));
    }

    #[test]
    fn rank_appears_once_assigned() {
        let mut record = sample("", None);
        record.rank = Some(1.234);
        let value = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(value["rank"], 1.234);
    }
}
