//! Events flow: every calendar, each with a window in its own time zone.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone};
use nextday_core::mapper::map_all;
use nextday_core::snapshot::write_snapshot;
use nextday_core::{Calendar, DayWindow, Event};
use nextday_google::Services;

use super::log_recovered;
use crate::settings::{EVENTS_SNAPSHOT, Settings};

pub async fn fetch_all_events(services: &Services, settings: &Settings) -> Result<Vec<Event>> {
    fetch_all_events_at(services, settings, Local::now()).await
}

/// Events flow relative to `now`.
///
/// Transport failures listing calendars, or listing one calendar's events,
/// are logged and skipped, so the snapshot may be incomplete. Records with
/// missing required fields still abort the flow.
pub async fn fetch_all_events_at<L: TimeZone>(
    services: &Services,
    settings: &Settings,
    now: DateTime<L>,
) -> Result<Vec<Event>> {
    let calendars: Vec<Calendar> = match services.events.list_calendars().await {
        Ok(raw) => map_all(raw),
        Err(e) if e.is_transport() => {
            log_recovered("listing calendars", &e);
            Vec::new()
        }
        Err(e) => return Err(e).context("Failed to list calendars"),
    };

    let mut events = Vec::new();

    for calendar in &calendars {
        let window = DayWindow::tomorrow_from(now.clone(), &calendar.time_zone)
            .with_context(|| format!("Invalid time zone on calendar {}", calendar.id))?;

        let result = services
            .events
            .list_events_for_calendar(
                &calendar.id,
                &window.start_rfc3339(),
                &window.end_rfc3339(),
                &calendar.time_zone,
            )
            .await;

        match result {
            Ok(raw) if raw.is_empty() => {
                println!("No upcoming events found for {}.", calendar.id);
            }
            Ok(raw) => {
                tracing::info!(calendar = %calendar.summary, count = raw.len(), "Fetched events");
                events.extend(map_all::<_, Event>(raw));
            }
            Err(e) if e.is_transport() => {
                log_recovered(&format!("listing events for {}", calendar.id), &e);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to list events for {}", calendar.id));
            }
        }
    }

    write_snapshot(&settings.output_path(EVENTS_SNAPSHOT), &events)?;

    Ok(events)
}
