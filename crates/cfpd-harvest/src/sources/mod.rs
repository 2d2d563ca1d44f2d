//! Provider source abstractions.
//!
//! Each provider implements [`Source`]: a stateless value holding its fixed
//! endpoint configuration, producing records on demand as a lazy stream.
//! Endpoint harvesting follows an explicit two-step fallback chain — a
//! structured JSON API first, the provider's syndication feed when the API
//! fails or comes back empty — with the decision modelled as a typed
//! [`StrategyOutcome`] rather than exception-driven control flow.

mod elsevier;
mod mdpi;
mod wiley;

pub use elsevier::ElsevierSource;
pub use mdpi::MdpiSource;
pub use wiley::WileySource;

use cfpd_core::Cfp;
use futures::stream::BoxStream;
use serde::de::DeserializeOwned;

use crate::cancel::CancelFlag;
use crate::deadline::extract_deadline;
use crate::feed::FeedEntry;
use crate::fetch::Fetcher;
use crate::warn::WarningSink;

/// Shared per-run state handed to every source.
pub struct HarvestContext {
    pub fetcher: Fetcher,
    pub warnings: WarningSink,
    pub cancel: CancelFlag,
}

/// One provider of CFP announcements.
///
/// `fetch_all` returns a lazy, finite stream: network I/O happens per
/// endpoint as the stream is polled, so dropping it early cancels the
/// remaining requests. The stream is not restartable — a fresh call
/// re-executes the I/O.
pub trait Source: Send + Sync {
    /// Stable identifier used for provider selection.
    fn id(&self) -> &'static str;

    fn fetch_all<'a>(&'a self, ctx: &'a HarvestContext) -> BoxStream<'a, Cfp>;
}

/// The built-in provider set, in default iteration order.
#[must_use]
pub fn default_sources() -> Vec<Box<dyn Source>> {
    vec![
        Box::new(ElsevierSource::new()),
        Box::new(WileySource::new()),
        Box::new(MdpiSource::new()),
    ]
}

/// Result of one endpoint's primary strategy.
pub(crate) enum StrategyOutcome {
    /// The structured payload yielded records; the fallback is skipped.
    Success(Vec<Cfp>),
    /// The payload parsed but held no entries.
    Empty,
    /// Transport or payload-shape failure, with a human-readable reason.
    Failed(String),
}

/// Fetches `url` and deserializes the body, folding both failure modes into
/// a reason string for [`StrategyOutcome::Failed`].
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    ctx: &HarvestContext,
    url: &str,
) -> Result<T, String> {
    let body = ctx
        .fetcher
        .fetch_text(url)
        .await
        .map_err(|e| format!("network error: {e}"))?;
    serde_json::from_str(&body).map_err(|e| format!("bad JSON: {e}"))
}

/// Resolves a primary-strategy outcome, running the feed fallback when the
/// primary produced nothing usable.
pub(crate) async fn apply_fallback(
    ctx: &HarvestContext,
    source_id: &str,
    provider: &str,
    journal: &str,
    feed_url: &str,
    outcome: StrategyOutcome,
) -> Vec<Cfp> {
    match outcome {
        StrategyOutcome::Success(records) => records,
        StrategyOutcome::Empty => {
            ctx.warnings
                .emit(source_id, "primary payload had no entries, trying feed");
            fallback_from_feed(ctx, source_id, provider, journal, feed_url).await
        }
        StrategyOutcome::Failed(reason) => {
            ctx.warnings.emit(source_id, &format!("{reason}, trying feed"));
            fallback_from_feed(ctx, source_id, provider, journal, feed_url).await
        }
    }
}

/// Secondary strategy: pull the provider's feed, keep entries that look like
/// CFP announcements, and map them to records.
async fn fallback_from_feed(
    ctx: &HarvestContext,
    source_id: &str,
    provider: &str,
    journal: &str,
    feed_url: &str,
) -> Vec<Cfp> {
    match ctx.fetcher.fetch_feed(feed_url).await {
        Ok(entries) => {
            let records: Vec<Cfp> = entries
                .iter()
                .filter(|entry| is_cfp_entry(entry))
                .map(|entry| feed_entry_to_cfp(provider, journal, entry))
                .collect();
            tracing::debug!(
                source = source_id,
                total = entries.len(),
                kept = records.len(),
                "feed fallback"
            );
            records
        }
        Err(e) => {
            ctx.warnings.emit(source_id, &format!("feed error: {e}"));
            Vec::new()
        }
    }
}

/// Heuristic separating special-issue / call-for-papers feed items from
/// ordinary journal content.
pub(crate) fn is_cfp_entry(entry: &FeedEntry) -> bool {
    let title = entry.title.to_lowercase();
    let link = entry.link.to_lowercase();
    title.contains("special issue")
        || title.contains("call for papers")
        || link.contains("call-for-papers")
        || link.contains("special-issue")
        || link.contains("special_issue")
}

/// Maps a surviving feed entry to a record: title/summary become
/// title/description, the deadline comes from the summary text.
pub(crate) fn feed_entry_to_cfp(provider: &str, journal: &str, entry: &FeedEntry) -> Cfp {
    Cfp::new(
        provider,
        journal.to_owned(),
        entry.title.clone(),
        &entry.summary,
        extract_deadline(&entry.summary),
        entry.link.clone(),
    )
}
