//! Call-for-papers aggregation pipeline.
//!
//! Collects CFP announcements from publisher sources (Elsevier, Wiley, MDPI),
//! normalizes them into [`cfpd_core::Cfp`] records, and drives the per-source
//! fallback chain: a structured JSON API first, the provider's syndication
//! feed when the API is unavailable or empty. Soft failures (network errors,
//! malformed payloads, unparsable dates) are isolated per source and surfaced
//! through a [`WarningSink`]; only a caller-contract violation aborts a run.

pub mod cancel;
pub mod deadline;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod pipeline;
pub mod sources;
pub mod warn;

pub use cancel::CancelFlag;
pub use error::HarvestError;
pub use feed::FeedEntry;
pub use fetch::Fetcher;
pub use pipeline::{Harvester, RankSource};
pub use sources::{HarvestContext, Source};
pub use warn::WarningSink;
