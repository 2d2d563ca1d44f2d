//! Elsevier special-issues source.
//!
//! Primary: the journals API's `special-issues` listing. Secondary: the
//! journals site feed, filtered for CFP items.

use cfpd_core::Cfp;
use futures::stream::{self, BoxStream, StreamExt};
use serde::Deserialize;

use super::{apply_fallback, fetch_json, HarvestContext, Source, StrategyOutcome};
use crate::deadline::extract_deadline;

const SOURCE_ID: &str = "elsevier";
const PROVIDER: &str = "Elsevier";
const JOURNAL_PLACEHOLDER: &str = "Elsevier Journal";

const DEFAULT_API_BASE: &str = "https://api.journals.elsevier.com";
const DEFAULT_FEED_BASE: &str = "https://www.journals.elsevier.com";

#[derive(Debug, Deserialize)]
struct SpecialIssuesResponse {
    #[serde(default, rename = "specialIssues")]
    special_issues: Vec<SpecialIssue>,
}

#[derive(Debug, Deserialize)]
struct SpecialIssue {
    #[serde(rename = "journalTitle")]
    journal_title: Option<String>,
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "submissionDeadline")]
    submission_deadline: Option<String>,
    url: Option<String>,
}

pub struct ElsevierSource {
    api_base: String,
    feed_base: String,
}

impl ElsevierSource {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_API_BASE, DEFAULT_FEED_BASE)
    }

    /// Custom API and feed hosts, for pointing at a mock server in tests.
    #[must_use]
    pub fn with_base_urls(api_base: &str, feed_base: &str) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_owned(),
            feed_base: feed_base.trim_end_matches('/').to_owned(),
        }
    }

    async fn primary(&self, ctx: &HarvestContext) -> StrategyOutcome {
        let url = format!("{}/special-issues?limit=100", self.api_base);
        let payload: SpecialIssuesResponse = match fetch_json(ctx, &url).await {
            Ok(payload) => payload,
            Err(reason) => return StrategyOutcome::Failed(reason),
        };
        if payload.special_issues.is_empty() {
            return StrategyOutcome::Empty;
        }
        StrategyOutcome::Success(payload.special_issues.into_iter().map(map_issue).collect())
    }

    async fn harvest(&self, ctx: &HarvestContext) -> Vec<Cfp> {
        let outcome = self.primary(ctx).await;
        let feed_url = format!("{}/rss", self.feed_base);
        apply_fallback(
            ctx,
            SOURCE_ID,
            PROVIDER,
            JOURNAL_PLACEHOLDER,
            &feed_url,
            outcome,
        )
        .await
    }
}

fn map_issue(issue: SpecialIssue) -> Cfp {
    Cfp::new(
        PROVIDER,
        issue
            .journal_title
            .unwrap_or_else(|| JOURNAL_PLACEHOLDER.to_owned()),
        issue.title.unwrap_or_else(|| "Untitled".to_owned()),
        &issue.description.unwrap_or_default(),
        extract_deadline(issue.submission_deadline.as_deref().unwrap_or_default()),
        issue.url.unwrap_or_default(),
    )
}

impl Default for ElsevierSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for ElsevierSource {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }

    fn fetch_all<'a>(&'a self, ctx: &'a HarvestContext) -> BoxStream<'a, Cfp> {
        stream::once(self.harvest(ctx))
            .flat_map(stream::iter)
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_placeholders() {
        let record = map_issue(SpecialIssue {
            journal_title: None,
            title: None,
            description: None,
            submission_deadline: None,
            url: None,
        });
        assert_eq!(record.provider, "Elsevier");
        assert_eq!(record.journal, "Elsevier Journal");
        assert_eq!(record.title, "Untitled");
        assert_eq!(record.description, "");
        assert_eq!(record.deadline, None);
        assert_eq!(record.link, "");
    }

    #[test]
    fn deadline_is_extracted_from_submission_deadline_text() {
        let record = map_issue(SpecialIssue {
            journal_title: Some("Food Chemistry".to_owned()),
            title: Some("Fermentation".to_owned()),
            description: Some("desc".to_owned()),
            submission_deadline: Some("15 March 2026".to_owned()),
            url: Some("https://example.com".to_owned()),
        });
        assert_eq!(
            record.deadline,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 15)
        );
    }
}
