//! Soft-failure reporting.
//!
//! Warnings are a first-class output of a harvest run, not a side channel
//! tied to execution context: the sink is an explicit callback handed to the
//! harvester at construction, so a caller can collect warnings, forward them
//! to a UI, or keep the default tracing behaviour.

use std::fmt;
use std::sync::Arc;

/// Observer for soft failures raised during a harvest run.
///
/// Receives the provider id (or `"rank"` for enrichment) and a
/// human-readable message. Cloning shares the underlying callback.
#[derive(Clone)]
pub struct WarningSink(Arc<dyn Fn(&str, &str) + Send + Sync>);

impl WarningSink {
    pub fn new(callback: impl Fn(&str, &str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(callback))
    }

    pub fn emit(&self, provider: &str, message: &str) {
        (self.0)(provider, message);
    }
}

impl Default for WarningSink {
    /// Forwards warnings to `tracing::warn!`.
    fn default() -> Self {
        Self::new(|provider, message| tracing::warn!(provider, message, "harvest warning"))
    }
}

impl fmt::Debug for WarningSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WarningSink(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn emit_invokes_the_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::clone(&seen);
        let sink = WarningSink::new(move |provider, message| {
            store
                .lock()
                .expect("warning store lock")
                .push(format!("{provider}: {message}"));
        });

        sink.emit("elsevier", "network error");
        sink.emit("mdpi", "bad JSON");

        let seen = seen.lock().expect("warning store lock");
        assert_eq!(
            *seen,
            vec!["elsevier: network error".to_owned(), "mdpi: bad JSON".to_owned()]
        );
    }
}
