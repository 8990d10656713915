//! Quick check that credentials work: the next few events on the primary calendar.

use anyhow::{Context, Result};
use chrono::Utc;
use nextday_core::Event;
use nextday_core::mapper::map_all;
use nextday_google::Services;

use super::log_recovered;
use crate::settings::{Settings, UPCOMING_DUMP};

/// `Ok(None)` when the request failed and the failure was already logged.
pub async fn fetch_upcoming(services: &Services, settings: &Settings) -> Result<Option<Vec<Event>>> {
    let result = services
        .events
        .list_upcoming_events(
            Utc::now(),
            settings.upcoming_max_results,
            &settings.output_path(UPCOMING_DUMP),
        )
        .await;

    match result {
        Ok(raw) => Ok(Some(map_all(raw))),
        Err(e) if e.is_transport() => {
            log_recovered("listing upcoming events", &e);
            Ok(None)
        }
        Err(e) => Err(e).context("Failed to list upcoming events"),
    }
}
