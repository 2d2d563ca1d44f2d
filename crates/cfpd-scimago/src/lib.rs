//! Client for the Scimago journal-rank API.
//!
//! Looks up a journal's SJR quality score by name. The API is treated as
//! unreliable by contract: an empty result set, a missing `SJR` field, or an
//! unparsable number all come back as `Ok(None)`, and callers are expected
//! to downgrade transport errors to a warning.

pub mod client;
pub mod error;

pub use client::ScimagoClient;
pub use error::ScimagoError;
