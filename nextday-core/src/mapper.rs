//! Conversions from provider records to snapshot DTOs.
//!
//! Decoding a raw record already enforced the required fields, so every
//! conversion here is total.

use crate::dto::{Calendar, Event, Task, TaskList};
use crate::raw::{RawCalendar, RawEvent, RawTask, RawTaskList};

impl From<RawEvent> for Event {
    fn from(event: RawEvent) -> Self {
        let start_date = event
            .start
            .date_time
            .clone()
            .or_else(|| event.start.date.clone())
            .unwrap_or_default();

        // Falls back to the *start* date when the end has no dateTime.
        // Downstream consumers rely on this output, so it stays until
        // product signs off on using end.date instead.
        let end_date = event
            .end
            .date_time
            .or(event.start.date)
            .unwrap_or_default();

        Event {
            id: event.id,
            summary: event.summary,
            start_date,
            end_date,
            link: event.html_link,
            status: event.status,
            description: event.description.unwrap_or_default(),
        }
    }
}

impl From<RawCalendar> for Calendar {
    fn from(calendar: RawCalendar) -> Self {
        Calendar {
            id: calendar.id,
            summary: calendar.summary,
            description: calendar.description.unwrap_or_default(),
            time_zone: calendar.time_zone,
        }
    }
}

impl From<RawTaskList> for TaskList {
    fn from(list: RawTaskList) -> Self {
        TaskList {
            id: list.id,
            self_link: list.self_link,
            title: list.title.unwrap_or_default(),
        }
    }
}

impl From<RawTask> for Task {
    fn from(task: RawTask) -> Self {
        Task {
            id: task.id,
            due: task.due.unwrap_or_default(),
            notes: task.notes.unwrap_or_default(),
            self_link: task.self_link,
            title: task.title,
            parent: task.parent.unwrap_or_default(),
            position: task.position.unwrap_or_default(),
        }
    }
}

/// Map a whole page of records.
pub fn map_all<R, D: From<R>>(records: Vec<R>) -> Vec<D> {
    records.into_iter().map(D::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::EventStatus;
    use crate::raw::RawEventTime;
    use serde_json::json;

    fn raw_event(start: RawEventTime, end: RawEventTime) -> RawEvent {
        RawEvent {
            id: "evt1".to_string(),
            summary: "Dentist".to_string(),
            start,
            end,
            html_link: "https://calendar.google.com/event?eid=evt1".to_string(),
            status: EventStatus::Tentative,
            description: None,
        }
    }

    fn timed(dt: &str) -> RawEventTime {
        RawEventTime {
            date_time: Some(dt.to_string()),
            ..Default::default()
        }
    }

    fn all_day(d: &str) -> RawEventTime {
        RawEventTime {
            date: Some(d.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_timed_event_keeps_explicit_end() {
        let event: Event = raw_event(
            timed("2024-03-15T09:00:00+02:00"),
            timed("2024-03-15T10:30:00+02:00"),
        )
        .into();

        assert_eq!(event.start_date, "2024-03-15T09:00:00+02:00");
        assert_eq!(event.end_date, "2024-03-15T10:30:00+02:00");
        assert_eq!(event.status, EventStatus::Tentative);
        assert_eq!(event.link, "https://calendar.google.com/event?eid=evt1");
        assert_eq!(event.description, "");
    }

    #[test]
    fn test_all_day_event_end_falls_back_to_start_date() {
        let event: Event = raw_event(all_day("2024-03-15"), all_day("2024-03-16")).into();

        assert_eq!(event.start_date, "2024-03-15");
        // end.date is ignored: the fallback reads start.date
        assert_eq!(event.end_date, "2024-03-15");
    }

    #[test]
    fn test_end_without_date_time_and_timed_start_is_empty() {
        let event: Event = raw_event(timed("2024-03-15T09:00:00Z"), all_day("2024-03-16")).into();

        assert_eq!(event.start_date, "2024-03-15T09:00:00Z");
        assert_eq!(event.end_date, "");
    }

    #[test]
    fn test_event_from_provider_json() {
        let raw: RawEvent = serde_json::from_value(json!({
            "kind": "calendar#event",
            "id": "abc123_20240315T070000Z",
            "status": "cancelled",
            "htmlLink": "https://www.google.com/calendar/event?eid=abc",
            "summary": "Gym",
            "description": "Leg day",
            "start": { "dateTime": "2024-03-15T09:00:00+02:00", "timeZone": "Europe/Kyiv" },
            "end": { "dateTime": "2024-03-15T10:00:00+02:00", "timeZone": "Europe/Kyiv" },
            "recurringEventId": "abc123"
        }))
        .unwrap();

        let event = Event::from(raw);
        assert_eq!(event.id, "abc123_20240315T070000Z");
        assert_eq!(event.status, EventStatus::Cancelled);
        assert_eq!(event.description, "Leg day");
        assert_eq!(event.end_date, "2024-03-15T10:00:00+02:00");
    }

    #[test]
    fn test_calendar_description_defaults_empty() {
        let raw: RawCalendar = serde_json::from_value(json!({
            "id": "family@group.calendar.google.com",
            "summary": "Family",
            "timeZone": "Europe/Kyiv"
        }))
        .unwrap();

        let calendar = Calendar::from(raw);
        assert_eq!(calendar.description, "");
        assert_eq!(calendar.time_zone, "Europe/Kyiv");
    }

    #[test]
    fn test_task_list_title_defaults_empty() {
        let raw: RawTaskList = serde_json::from_value(json!({
            "id": "l1",
            "selfLink": "https://www.googleapis.com/tasks/v1/users/@me/lists/l1"
        }))
        .unwrap();

        assert_eq!(TaskList::from(raw).title, "");
    }

    #[test]
    fn test_task_optional_fields_default_to_empty_strings() {
        let raw: RawTask = serde_json::from_value(json!({
            "id": "t1",
            "title": "Pay rent",
            "selfLink": "https://www.googleapis.com/tasks/v1/lists/l1/tasks/t1"
        }))
        .unwrap();

        let task = Task::from(raw);
        assert_eq!(task.due, "");
        assert_eq!(task.notes, "");
        assert_eq!(task.parent, "");
        assert_eq!(task.position, "");

        let value = serde_json::to_value(&task).unwrap();
        for field in ["due", "notes", "parent", "position"] {
            assert_eq!(value[field], "", "{field} should be an empty string");
        }
    }

    #[test]
    fn test_subtask_keeps_parent_and_position() {
        let raw: RawTask = serde_json::from_value(json!({
            "id": "t2",
            "title": "Call landlord",
            "selfLink": "https://www.googleapis.com/tasks/v1/lists/l1/tasks/t2",
            "parent": "t1",
            "position": "00000000000000000001",
            "due": "2024-03-15T00:00:00.000Z",
            "notes": "before noon"
        }))
        .unwrap();

        let task = Task::from(raw);
        assert_eq!(task.parent, "t1");
        assert_eq!(task.position, "00000000000000000001");
        assert_eq!(task.due, "2024-03-15T00:00:00.000Z");
        assert_eq!(task.notes, "before noon");
    }

    #[test]
    fn test_map_all_preserves_order() {
        let lists: Vec<TaskList> = map_all(vec![
            RawTaskList {
                id: "b".into(),
                self_link: "sb".into(),
                title: None,
            },
            RawTaskList {
                id: "a".into(),
                self_link: "sa".into(),
                title: Some("Work".into()),
            },
        ]);

        assert_eq!(lists[0].id, "b");
        assert_eq!(lists[1].title, "Work");
    }
}
