//! Wiley calls-for-papers source.
//!
//! Primary: the static `calls.json` artifact Wiley publishes to S3 — a bare
//! JSON array. Secondary: the library feed, filtered for CFP items.

use cfpd_core::Cfp;
use futures::stream::{self, BoxStream, StreamExt};
use serde::Deserialize;

use super::{apply_fallback, fetch_json, HarvestContext, Source, StrategyOutcome};
use crate::deadline::extract_deadline;

const SOURCE_ID: &str = "wiley";
const PROVIDER: &str = "Wiley";
const JOURNAL_PLACEHOLDER: &str = "Wiley Journal";

const DEFAULT_API_BASE: &str = "https://wol-prod-cfp-files.s3.amazonaws.com";
const DEFAULT_FEED_BASE: &str = "https://onlinelibrary.wiley.com";

#[derive(Debug, Deserialize)]
struct Call {
    #[serde(rename = "journalTitle")]
    journal_title: Option<String>,
    title: Option<String>,
    description: Option<String>,
    deadline: Option<String>,
    url: Option<String>,
}

pub struct WileySource {
    api_base: String,
    feed_base: String,
}

impl WileySource {
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
        let url = format!("{}/v2/calls.json", self.api_base);
        let calls: Vec<Call> = match fetch_json(ctx, &url).await {
            Ok(calls) => calls,
            Err(reason) => return StrategyOutcome::Failed(reason),
        };
        if calls.is_empty() {
            return StrategyOutcome::Empty;
        }
        StrategyOutcome::Success(calls.into_iter().map(map_call).collect())
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

fn map_call(call: Call) -> Cfp {
    Cfp::new(
        PROVIDER,
        call.journal_title
            .unwrap_or_else(|| JOURNAL_PLACEHOLDER.to_owned()),
        call.title.unwrap_or_else(|| "Untitled".to_owned()),
        &call.description.unwrap_or_default(),
        extract_deadline(call.deadline.as_deref().unwrap_or_default()),
        call.url.unwrap_or_default(),
    )
}

impl Default for WileySource {
    fn default() -> Self {
        Self::new()
    }
}

impl Source for WileySource {
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
        let record = map_call(Call {
            journal_title: None,
            title: None,
            description: None,
            deadline: None,
            url: None,
        });
        assert_eq!(record.provider, "Wiley");
        assert_eq!(record.journal, "Wiley Journal");
        assert_eq!(record.title, "Untitled");
        assert_eq!(record.deadline, None);
    }

    #[test]
    fn deadline_field_is_parsed() {
        let record = map_call(Call {
            journal_title: Some("Journal of Food Science".to_owned()),
            title: Some("Novel Proteins".to_owned()),
            description: None,
            deadline: Some("Deadline: 1 December 2026".to_owned()),
            url: None,
        });
        assert_eq!(
            record.deadline,
            chrono::NaiveDate::from_ymd_opt(2026, 12, 1)
        );
    }
}
