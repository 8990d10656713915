//! Top-level flows. Each one fetches, maps, and writes a single snapshot.

pub mod events;
pub mod tasks;
pub mod upcoming;

use nextday_google::ProviderError;

/// Log a fetch failure that the caller has chosen to recover from.
fn log_recovered(what: &str, error: &ProviderError) {
    tracing::error!("An error occurred while {}: {}", what, error);
}
