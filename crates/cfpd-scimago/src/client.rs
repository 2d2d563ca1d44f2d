//! HTTP client for the Scimago `journalrank.php` endpoint.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::ScimagoError;

const DEFAULT_BASE_URL: &str = "https://www.scimagojr.com";

#[derive(Debug, Deserialize)]
struct RankEntry {
    #[serde(rename = "SJR")]
    sjr: Option<String>,
}

/// Client for the Scimago journal-rank API.
///
/// Use [`ScimagoClient::new`] for production or
/// [`ScimagoClient::with_base_url`] to point at a mock server in tests.
/// Lookups sleep a fixed delay before each request, the same cooperative
/// throttling the harvest fetcher applies.
pub struct ScimagoClient {
    client: Client,
    endpoint: Url,
    delay: Duration,
}

impl ScimagoClient {
    /// Creates a client pointed at the production Scimago API.
    ///
    /// # Errors
    ///
    /// Returns [`ScimagoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, delay_ms: u64) -> Result<Self, ScimagoError> {
        Self::with_base_url(timeout_secs, delay_ms, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ScimagoError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ScimagoError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        delay_ms: u64,
        base_url: &str,
    ) -> Result<Self, ScimagoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("cfpd/0.1 (cfp-aggregation)")
            .build()?;

        let raw = format!("{}/journalrank.php", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&raw).map_err(|e| ScimagoError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            delay: Duration::from_millis(delay_ms),
        })
    }

    /// Looks up the SJR score for a journal name.
    ///
    /// Returns the first matching entry's score. `Ok(None)` covers every
    /// "no usable score" case: no matches, a missing `SJR` field, or a value
    /// that does not parse as a number. Scimago renders scores with a
    /// decimal comma (`"1,234"`), which is normalized before parsing.
    ///
    /// # Errors
    ///
    /// - [`ScimagoError::Http`] on network failure or non-2xx status.
    /// - [`ScimagoError::Deserialize`] if the body is not the expected JSON.
    pub async fn rank_lookup(&self, journal: &str) -> Result<Option<f64>, ScimagoError> {
        tokio::time::sleep(self.delay).await;
        let encoded = utf8_percent_encode(journal, NON_ALPHANUMERIC).to_string();
        let url = format!("{}?out=json&search={encoded}", self.endpoint);
        tracing::debug!(journal, "SJR lookup");

        let response = self.client.get(&url).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        let entries: Vec<RankEntry> =
            serde_json::from_str(&body).map_err(|e| ScimagoError::Deserialize {
                context: format!("journalrank(search={journal})"),
                source: e,
            })?;

        Ok(entries
            .first()
            .and_then(|entry| entry.sjr.as_deref())
            .and_then(parse_sjr))
    }
}

/// Parses an SJR score string, normalizing the decimal comma.
fn parse_sjr(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sjr_normalizes_decimal_comma() {
        assert_eq!(parse_sjr("1,234"), Some(1.234));
    }

    #[test]
    fn parse_sjr_accepts_plain_decimal() {
        assert_eq!(parse_sjr("0.58"), Some(0.58));
    }

    #[test]
    fn parse_sjr_rejects_junk() {
        assert_eq!(parse_sjr("n/a"), None);
        assert_eq!(parse_sjr(""), None);
    }

    #[test]
    fn with_base_url_strips_trailing_slash() {
        let client = ScimagoClient::with_base_url(5, 0, "https://www.scimagojr.com/")
            .expect("client construction should not fail");
        assert_eq!(
            client.endpoint.as_str(),
            "https://www.scimagojr.com/journalrank.php"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = ScimagoClient::with_base_url(5, 0, "not a url").unwrap_err();
        assert!(matches!(err, ScimagoError::InvalidBaseUrl { .. }));
    }
}
