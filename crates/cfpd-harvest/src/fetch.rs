//! Rate-limited HTTP fetch layer.
//!
//! All live network I/O for API-style sources goes through [`Fetcher`]. It
//! enforces a fixed sleep before every request (cooperative self-throttling,
//! not a token bucket), sends an identifying `User-Agent`, and retries a
//! certificate-validation failure exactly once with validation disabled.
//! Every other transport failure — DNS, refused connection, timeout, non-2xx
//! status — is returned to the caller without retry.

use std::time::Duration;

use reqwest::Client;

use crate::error::HarvestError;
use crate::feed::{parse_feed, FeedEntry};

/// Rate-limited HTTP GET client shared by all sources in a run.
pub struct Fetcher {
    client: Client,
    /// Fallback client with certificate validation disabled. Used for at
    /// most one retry per request, only after a certificate failure.
    insecure: Client,
    delay: Duration,
}

impl Fetcher {
    /// Creates a fetcher with the given per-request timeout, inter-request
    /// delay, and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, delay_ms: u64, user_agent: &str) -> Result<Self, HarvestError> {
        let build = |accept_invalid_certs: bool| {
            Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .connect_timeout(Duration::from_secs(10))
                .user_agent(user_agent)
                .danger_accept_invalid_certs(accept_invalid_certs)
                .build()
        };
        Ok(Self {
            client: build(false)?,
            insecure: build(true)?,
            delay: Duration::from_millis(delay_ms),
        })
    }

    /// Fetches `url` and returns the response body.
    ///
    /// Sleeps the configured inter-request delay first. A certificate
    /// failure is retried once through the validation-disabled client; if
    /// the retry also fails its error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Http`] on any transport failure or non-2xx
    /// status.
    pub async fn fetch_text(&self, url: &str) -> Result<String, HarvestError> {
        tokio::time::sleep(self.delay).await;
        tracing::debug!(url, "GET");
        match get_text(&self.client, url).await {
            Ok(body) => Ok(body),
            Err(err) if chain_mentions_certificate(&err) => {
                tracing::debug!(url, error = %err, "certificate failure, retrying without validation");
                get_text(&self.insecure, url).await.map_err(HarvestError::Http)
            }
            Err(err) => Err(HarvestError::Http(err)),
        }
    }

    /// Retrieves a syndication feed and parses it into entries.
    ///
    /// Same transport contract as [`Fetcher::fetch_text`]; a feed with no
    /// items is `Ok` with an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Http`] on transport failure or
    /// [`HarvestError::Xml`] if the body is not well-formed XML.
    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<FeedEntry>, HarvestError> {
        let body = self.fetch_text(url).await?;
        parse_feed(&body)
    }
}

async fn get_text(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    let response = client.get(url).send().await?;
    let response = response.error_for_status()?;
    response.text().await
}

/// Returns `true` if any error in the source chain reads as a TLS
/// certificate problem.
///
/// `reqwest` does not expose certificate failures as a dedicated kind, so
/// this walks the chain and matches on the rendered messages (rustls reports
/// `invalid peer certificate: ...`).
fn chain_mentions_certificate(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(cause) = current {
        let text = cause.to_string();
        if text.contains("certificate") || text.contains("Certificate") {
            return true;
        }
        current = cause.source();
    }
    false
}
