//! Harvest orchestration.
//!
//! The [`Harvester`] drives the selected sources sequentially, isolates
//! per-source failures, optionally enriches records with a journal rank, and
//! returns the concatenated record set in selection order.

use cfpd_core::Cfp;
use futures::future::BoxFuture;
use futures::StreamExt;

use crate::cancel::CancelFlag;
use crate::error::HarvestError;
use crate::fetch::Fetcher;
use crate::sources::{default_sources, HarvestContext, Source};
use crate::warn::WarningSink;

/// External journal-rank collaborator.
///
/// Implementations are expected to be unreliable: a lookup that fails for
/// any reason returns `None`, and the harvester only ever reacts with a
/// warning — enrichment can never drop a record or fail a run.
pub trait RankSource: Send + Sync {
    fn rank_lookup<'a>(&'a self, journal: &'a str) -> BoxFuture<'a, Option<f64>>;
}

/// Drives a set of [`Source`]s and accumulates their records.
pub struct Harvester {
    ctx: HarvestContext,
    sources: Vec<Box<dyn Source>>,
    rank_source: Option<Box<dyn RankSource>>,
}

impl Harvester {
    /// Harvester over the built-in provider set.
    #[must_use]
    pub fn new(fetcher: Fetcher, warnings: WarningSink) -> Self {
        Self::with_sources(fetcher, warnings, default_sources())
    }

    /// Harvester over a custom source registry.
    #[must_use]
    pub fn with_sources(
        fetcher: Fetcher,
        warnings: WarningSink,
        sources: Vec<Box<dyn Source>>,
    ) -> Self {
        Self {
            ctx: HarvestContext {
                fetcher,
                warnings,
                cancel: CancelFlag::new(),
            },
            sources,
            rank_source: None,
        }
    }

    /// Attaches the collaborator used when a run requests enrichment.
    #[must_use]
    pub fn with_rank_source(mut self, rank_source: Box<dyn RankSource>) -> Self {
        self.rank_source = Some(rank_source);
        self
    }

    /// Handle for cancelling an in-flight run from another task.
    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.ctx.cancel.clone()
    }

    /// Ids of the registered sources, in registry order.
    #[must_use]
    pub fn provider_ids(&self) -> Vec<&'static str> {
        self.sources.iter().map(|source| source.id()).collect()
    }

    /// Runs the selected providers in the given order and returns their
    /// records, concatenated.
    ///
    /// A source whose endpoints are all unreachable contributes zero records
    /// and does not abort the run. When `enrich` is set, each record gets a
    /// rank lookup keyed by its journal name; lookup failures leave `rank`
    /// absent. A cancelled run stops issuing requests and returns the
    /// records gathered so far.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::UnknownProvider`] if `selected` names a
    /// provider that is not registered. This is checked up front, before any
    /// network I/O.
    pub async fn run(&self, selected: &[&str], enrich: bool) -> Result<Vec<Cfp>, HarvestError> {
        let mut picked = Vec::with_capacity(selected.len());
        for id in selected {
            let source = self
                .sources
                .iter()
                .find(|source| source.id() == *id)
                .ok_or_else(|| HarvestError::UnknownProvider((*id).to_string()))?;
            picked.push(source.as_ref());
        }

        let mut records = Vec::new();
        for source in picked {
            if self.ctx.cancel.is_cancelled() {
                tracing::info!(
                    provider = source.id(),
                    "run cancelled, returning records gathered so far"
                );
                break;
            }
            let before = records.len();
            let mut stream = source.fetch_all(&self.ctx);
            while let Some(record) = stream.next().await {
                records.push(record);
            }
            tracing::debug!(
                provider = source.id(),
                count = records.len() - before,
                "source drained"
            );
        }

        if enrich {
            self.enrich(&mut records).await;
        }

        Ok(records)
    }

    async fn enrich(&self, records: &mut [Cfp]) {
        let Some(rank_source) = self.rank_source.as_deref() else {
            self.ctx
                .warnings
                .emit("rank", "enrichment requested but no rank source configured");
            return;
        };
        for record in records.iter_mut() {
            if self.ctx.cancel.is_cancelled() {
                break;
            }
            match rank_source.rank_lookup(&record.journal).await {
                Some(rank) => record.rank = Some(rank),
                None => self.ctx.warnings.emit(
                    "rank",
                    &format!("no rank for journal \"{}\"", record.journal),
                ),
            }
        }
    }
}
