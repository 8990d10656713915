//! The "tomorrow" window used to filter events and tasks.

use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone};
use chrono_tz::Tz;

use crate::error::{CoreError, CoreResult};

/// Start and end of a single day, expressed in a target time zone.
///
/// The day boundaries are taken from the *caller's* local calendar day and
/// wall clock; the target zone only decides which offset the instants are
/// written with. When the local zone and the target zone differ, the window
/// is shifted by the offset difference.
#[derive(Debug, Clone, PartialEq)]
pub struct DayWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl DayWindow {
    /// Window for tomorrow, relative to the system clock and local zone.
    pub fn tomorrow(tz_name: &str) -> CoreResult<Self> {
        Self::tomorrow_from(Local::now(), tz_name)
    }

    /// Window for the day after `now`'s local date.
    pub fn tomorrow_from<L: TimeZone>(now: DateTime<L>, tz_name: &str) -> CoreResult<Self> {
        let tz = parse_time_zone(tz_name)?;
        let local_zone = now.timezone();

        let tomorrow = now.date_naive().succ_opt().ok_or_else(|| {
            CoreError::InvalidLocalTime(format!("day after {}", now.date_naive()))
        })?;

        let start = tomorrow.and_time(NaiveTime::MIN);
        let end = tomorrow
            .and_hms_micro_opt(23, 59, 59, 999_999)
            .ok_or_else(|| CoreError::InvalidLocalTime(format!("{tomorrow} 23:59:59.999999")))?;

        let window = DayWindow {
            start: localize(&local_zone, start)?.with_timezone(&tz),
            end: localize(&local_zone, end)?.with_timezone(&tz),
        };

        tracing::debug!(
            tz = tz_name,
            start = %window.start_rfc3339(),
            end = %window.end_rfc3339(),
            "Computed next-day window"
        );

        Ok(window)
    }

    /// e.g. `2024-03-15T00:00:00+00:00`
    pub fn start_rfc3339(&self) -> String {
        format_instant(&self.start)
    }

    /// e.g. `2024-03-15T23:59:59.999999+00:00`
    pub fn end_rfc3339(&self) -> String {
        format_instant(&self.end)
    }
}

pub fn parse_time_zone(name: &str) -> CoreResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CoreError::UnknownTimeZone(name.to_string()))
}

// Ambiguous wall-clock times (DST fall-back) resolve to the earlier instant.
// Times inside a spring-forward gap take the offset in force just before
// the gap, which lands on the first wall-clock time that exists after it.
fn localize<L: TimeZone>(zone: &L, naive: NaiveDateTime) -> CoreResult<DateTime<L>> {
    if let Some(instant) = zone.from_local_datetime(&naive).earliest() {
        return Ok(instant);
    }

    let before_gap = naive - Duration::hours(1);
    zone.from_local_datetime(&before_gap)
        .earliest()
        .map(|instant| instant + Duration::hours(1))
        .ok_or_else(|| CoreError::InvalidLocalTime(naive.to_string()))
}

fn format_instant(instant: &DateTime<Tz>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}
