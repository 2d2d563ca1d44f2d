use thiserror::Error;

/// Errors surfaced by the harvest pipeline.
///
/// Soft failures (an unreachable endpoint, a malformed payload) never appear
/// here — they are recovered inside the source that hit them and reported
/// through the warning sink. [`HarvestError::UnknownProvider`] is the one
/// caller-contract violation that aborts a run.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown provider: {0}")]
    UnknownProvider(String),
}
