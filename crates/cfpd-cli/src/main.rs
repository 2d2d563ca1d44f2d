//! `cfpd` — crawl call-for-papers sources and export the records as JSON.
//!
//! The binary is the batch-export collaborator of the harvest pipeline: it
//! selects providers, runs the harvester, and writes the canonical JSON
//! array. All aggregation logic lives in `cfpd-harvest`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use futures::future::BoxFuture;
use tracing_subscriber::EnvFilter;

use cfpd_core::load_config_from_env;
use cfpd_harvest::sources::default_sources;
use cfpd_harvest::{Fetcher, Harvester, RankSource, WarningSink};
use cfpd_scimago::ScimagoClient;

#[derive(Debug, Parser)]
#[command(name = "cfpd")]
#[command(about = "Call-for-papers aggregation and export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl the selected providers and write the records as a JSON array.
    Export {
        /// Comma-separated provider ids (see `cfpd providers`).
        #[arg(long, value_delimiter = ',', default_value = "elsevier,wiley,mdpi")]
        providers: Vec<String>,
        /// Attach Scimago SJR scores to the records.
        #[arg(long)]
        enrich: bool,
        /// Output path; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the known provider ids.
    Providers,
}

/// Adapts the Scimago client to the harvester's enrichment seam,
/// downgrading client errors to a warning so enrichment can never fail a
/// run.
struct ScimagoRankSource {
    client: ScimagoClient,
}

impl RankSource for ScimagoRankSource {
    fn rank_lookup<'a>(&'a self, journal: &'a str) -> BoxFuture<'a, Option<f64>> {
        Box::pin(async move {
            match self.client.rank_lookup(journal).await {
                Ok(rank) => rank,
                Err(e) => {
                    tracing::warn!(journal, error = %e, "SJR lookup failed");
                    None
                }
            }
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = load_config_from_env().context("loading configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Export {
            providers,
            enrich,
            out,
        } => export(&config, &providers, enrich, out.as_deref()).await,
        Commands::Providers => {
            for source in default_sources() {
                println!("{}", source.id());
            }
            Ok(())
        }
    }
}

async fn export(
    config: &cfpd_core::AppConfig,
    providers: &[String],
    enrich: bool,
    out: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let fetcher = Fetcher::new(
        config.request_timeout_secs,
        config.inter_request_delay_ms,
        &config.user_agent,
    )?;

    let mut harvester = Harvester::new(fetcher, WarningSink::default());
    if enrich {
        let client = ScimagoClient::with_base_url(
            config.request_timeout_secs,
            config.inter_request_delay_ms,
            &config.scimago_base_url,
        )?;
        harvester = harvester.with_rank_source(Box::new(ScimagoRankSource { client }));
    }

    let selected: Vec<&str> = providers.iter().map(String::as_str).collect();
    let records = harvester.run(&selected, enrich).await?;
    tracing::info!(count = records.len(), enrich, "harvest complete");

    let json = serde_json::to_string_pretty(&records).context("serializing records")?;
    match out {
        Some(out_path) => {
            std::fs::write(out_path, json)
                .with_context(|| format!("writing {}", out_path.display()))?;
            tracing::info!(path = %out_path.display(), "export written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
