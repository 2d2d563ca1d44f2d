//! MDPI per-journal CFP source.
//!
//! MDPI exposes no cross-journal listing, so the source walks a fixed set of
//! journal slugs. Primary: the journal page's `format=cfp` JSON view.
//! Secondary: the per-journal feed, filtered for CFP items. A slug whose
//! endpoints are both down yields zero records and never stops the
//! remaining slugs.

use cfpd_core::Cfp;
use futures::stream::{self, BoxStream, StreamExt};
use serde::Deserialize;

use super::{apply_fallback, fetch_json, HarvestContext, Source, StrategyOutcome};
use crate::deadline::extract_deadline;

const SOURCE_ID: &str = "mdpi";
const PROVIDER: &str = "MDPI";

const DEFAULT_BASE: &str = "https://www.mdpi.com";
const DEFAULT_JOURNALS: [&str; 3] = ["foods", "nutrients", "metabolites"];

#[derive(Debug, Deserialize)]
struct CfpResponse {
    #[serde(default, rename = "specialIssues")]
    special_issues: Vec<SpecialIssue>,
}

#[derive(Debug, Deserialize)]
struct SpecialIssue {
    title: Option<String>,
    description: Option<String>,
    deadline: Option<String>,
    url: Option<String>,
}

pub struct MdpiSource {
    base: String,
    journals: Vec<String>,
}

impl MdpiSource {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(
            DEFAULT_BASE,
            DEFAULT_JOURNALS.iter().map(|s| (*s).to_owned()).collect(),
        )
    }

    /// Custom host and journal set, for pointing at a mock server in tests.
    #[must_use]
    pub fn with_base_url(base: &str, journals: Vec<String>) -> Self {
        Self {
            base: base.trim_end_matches('/').to_owned(),
            journals,
        }
    }

    async fn primary(&self, ctx: &HarvestContext, slug: &str) -> StrategyOutcome {
        let url = format!("{}/journal/{slug}?format=cfp&limit=100", self.base);
        let payload: CfpResponse = match fetch_json(ctx, &url).await {
            Ok(payload) => payload,
            Err(reason) => return StrategyOutcome::Failed(format!("{slug}: {reason}")),
        };
        if payload.special_issues.is_empty() {
            return StrategyOutcome::Empty;
        }
        let journal = capitalize(slug);
        StrategyOutcome::Success(
            payload
                .special_issues
                .into_iter()
                .map(|issue| map_issue(&journal, issue))
                .collect(),
        )
    }

    async fn harvest_journal(&self, ctx: &HarvestContext, slug: &str) -> Vec<Cfp> {
        let outcome = self.primary(ctx, slug).await;
        let feed_url = format!("{}/rss/journal/{slug}", self.base);
        apply_fallback(
            ctx,
            SOURCE_ID,
            PROVIDER,
            &capitalize(slug),
            &feed_url,
            outcome,
        )
        .await
    }
}

fn map_issue(journal: &str, issue: SpecialIssue) -> Cfp {
    Cfp::new(
        PROVIDER,
        journal.to_owned(),
        issue.title.unwrap_or_else(|| "Untitled".to_owned()),
        &issue.description.unwrap_or_default(),
        extract_deadline(issue.deadline.as_deref().unwrap_or_default()),
        issue.url.unwrap_or_default(),
    )
}

/// `"foods"` → `"Foods"`. MDPI journal slugs are plain ASCII words.
fn capitalize(slug: &str) -> String {
    let mut chars = slug.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl Default for MdpiSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for MdpiSource {
    fn id(&self) -> &'static str {
        SOURCE_ID
    }

    fn fetch_all<'a>(&'a self, ctx: &'a HarvestContext) -> BoxStream<'a, Cfp> {
        stream::iter(self.journals.clone())
            .then(move |slug| async move {
                if ctx.cancel.is_cancelled() {
                    return Vec::new();
                }
                self.harvest_journal(ctx, &slug).await
            })
            .flat_map(stream::iter)
            .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_uppercases_the_first_letter() {
        assert_eq!(capitalize("foods"), "Foods");
        assert_eq!(capitalize("nutrients"), "Nutrients");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn journal_comes_from_the_slug_not_the_payload() {
        let record = map_issue(
            "Foods",
            SpecialIssue {
                title: Some("Fermented Beverages".to_owned()),
                description: None,
                deadline: Some("20 August 2026".to_owned()),
                url: None,
            },
        );
        assert_eq!(record.journal, "Foods");
        assert_eq!(
            record.deadline,
            chrono::NaiveDate::from_ymd_opt(2026, 8, 20)
        );
    }
}
