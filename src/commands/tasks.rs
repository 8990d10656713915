//! Tasks flow: every task list, one shared window, one snapshot.

use anyhow::{Context, Result};
use nextday_core::mapper::map_all;
use nextday_core::snapshot::write_snapshot;
use nextday_core::{DayWindow, Task, TaskList};
use nextday_google::Services;

use crate::settings::{Settings, TASK_LISTS_DUMP, TASKS_SNAPSHOT};

/// Fetch tomorrow's tasks (window computed in `tz`) from all lists.
pub async fn fetch_all_tasks(services: &Services, settings: &Settings, tz: &str) -> Result<Vec<Task>> {
    let window = DayWindow::tomorrow(tz)?;
    fetch_all_tasks_in(services, settings, &window).await
}

/// Tasks flow with an explicit window.
///
/// Output order is task-list order, then provider order within each list.
/// Any fetch or decode failure aborts the flow before the snapshot is written.
pub async fn fetch_all_tasks_in(
    services: &Services,
    settings: &Settings,
    window: &DayWindow,
) -> Result<Vec<Task>> {
    let due_min = window.start_rfc3339();
    let due_max = window.end_rfc3339();

    let task_lists: Vec<TaskList> = map_all(
        services
            .tasks
            .list_task_lists(&settings.output_path(TASK_LISTS_DUMP))
            .await
            .context("Failed to list task lists")?,
    );

    let mut tasks = Vec::new();

    for list in &task_lists {
        let raw = services
            .tasks
            .list_tasks_for_list(&list.id, &due_min, &due_max)
            .await
            .with_context(|| format!("Failed to list tasks in '{}'", list.title))?;

        tracing::info!(list = %list.title, count = raw.len(), "Fetched tasks");
        tasks.extend(map_all::<_, Task>(raw));
    }

    write_snapshot(&settings.output_path(TASKS_SNAPSHOT), &tasks)?;

    Ok(tasks)
}
