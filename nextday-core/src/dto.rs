//! Flat records written to snapshot files.
//!
//! Field names here are the snapshot JSON keys. Every field is always
//! present; optional provider values are carried as empty strings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One occurrence of a calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub summary: String,
    /// `dateTime` of the start, or the all-day `date`
    pub start_date: String,
    pub end_date: String,
    /// Link to the event in the Google Calendar web UI
    pub link: String,
    pub status: EventStatus,
    pub description: String,
}

/// Written lowercase. Values outside the known set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
    Other(String),
}

impl From<String> for EventStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "confirmed" => EventStatus::Confirmed,
            "tentative" => EventStatus::Tentative,
            "cancelled" => EventStatus::Cancelled,
            _ => EventStatus::Other(status),
        }
    }
}

impl From<EventStatus> for String {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Confirmed => "confirmed".to_string(),
            EventStatus::Tentative => "tentative".to_string(),
            EventStatus::Cancelled => "cancelled".to_string(),
            EventStatus::Other(other) => other,
        }
    }
}

/// A calendar owned by the authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub summary: String,
    pub description: String,
    /// IANA name, e.g. "Europe/Kyiv"
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: String,
    pub self_link: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// RFC 3339 due date, empty when the task has none
    pub due: String,
    pub notes: String,
    pub self_link: String,
    pub title: String,
    /// Parent task id, empty for top-level tasks
    pub parent: String,
    /// Ordering key among siblings, compared as a plain string
    pub position: String,
}

impl Task {
    pub fn is_top_level(&self) -> bool {
        self.parent.is_empty()
    }

    /// Relative order of two siblings. `None` when the tasks have different parents.
    pub fn sibling_cmp(&self, other: &Task) -> Option<Ordering> {
        (self.parent == other.parent).then(|| self.position.cmp(&other.position))
    }
}

/// Sort tasks so that siblings follow their `position` order.
///
/// Tasks are grouped by parent id; within a group the sort is stable, so
/// equal positions keep their provider order.
pub fn sort_by_position(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.parent
            .cmp(&b.parent)
            .then_with(|| a.position.cmp(&b.position))
    });
}
