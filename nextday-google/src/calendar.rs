//! Google Calendar v3 fetchers.

use chrono::{DateTime, SecondsFormat, Utc};
use nextday_core::raw::{ListPage, RawCalendar, RawEvent};
use nextday_core::snapshot;
use std::path::Path;

use crate::api::{self, ApiClient};
use crate::error::ProviderResult;

pub const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google's alias for the user's main calendar
pub const PRIMARY_CALENDAR_ID: &str = "primary";

/// Handle for the events domain.
#[derive(Debug, Clone)]
pub struct EventsService {
    api: ApiClient,
}

impl EventsService {
    pub fn new(api: ApiClient) -> Self {
        EventsService { api }
    }

    /// Calendars on the authenticated account's calendar list.
    pub async fn list_calendars(&self) -> ProviderResult<Vec<RawCalendar>> {
        let segments = ["users", "me", "calendarList"];
        let items = self.api.list_items(&segments, &[]).await?;

        api::decode_items(&segments.join("/"), items)
    }

    /// Single occurrences overlapping `[time_min, time_max)`, ordered by start.
    pub async fn list_events_for_calendar(
        &self,
        calendar_id: &str,
        time_min: &str,
        time_max: &str,
        time_zone: &str,
    ) -> ProviderResult<Vec<RawEvent>> {
        let segments = ["calendars", calendar_id, "events"];
        let query = [
            ("timeMin", time_min.to_string()),
            ("timeMax", time_max.to_string()),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
            ("timeZone", time_zone.to_string()),
        ];

        let items = self.api.list_items(&segments, &query).await?;

        api::decode_items(&segments.join("/"), items)
    }

    /// The next `max_results` events on the primary calendar, starting at `now`.
    ///
    /// The whole response body is written to `raw_dump` before decoding.
    pub async fn list_upcoming_events(
        &self,
        now: DateTime<Utc>,
        max_results: u32,
        raw_dump: &Path,
    ) -> ProviderResult<Vec<RawEvent>> {
        let segments = ["calendars", PRIMARY_CALENDAR_ID, "events"];
        let query = [
            ("timeMin", now.to_rfc3339_opts(SecondsFormat::Micros, true)),
            ("maxResults", max_results.to_string()),
            ("singleEvents", "true".to_string()),
            ("orderBy", "startTime".to_string()),
        ];

        let url = self.api.url(&segments, &query)?;
        let label = url.to_string();
        let response = self.api.get(url).await?;

        snapshot::write_json(raw_dump, &response)?;

        let page: ListPage<RawEvent> = api::decode(&label, response)?;
        Ok(page.items)
    }
}
