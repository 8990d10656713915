//! Google Tasks v1 fetchers.

use nextday_core::raw::{RawTask, RawTaskList};
use nextday_core::snapshot;
use std::path::Path;

use crate::api::{self, ApiClient};
use crate::error::ProviderResult;

pub const TASKS_API_BASE: &str = "https://tasks.googleapis.com/tasks/v1";

/// Handle for the tasks domain.
#[derive(Debug, Clone)]
pub struct TasksService {
    api: ApiClient,
}

impl TasksService {
    pub fn new(api: ApiClient) -> Self {
        TasksService { api }
    }

    /// All task lists. The raw items are written verbatim to `raw_dump` first.
    pub async fn list_task_lists(&self, raw_dump: &Path) -> ProviderResult<Vec<RawTaskList>> {
        let segments = ["users", "@me", "lists"];
        let items = self.api.list_items(&segments, &[]).await?;

        snapshot::write_json(raw_dump, &items)?;

        api::decode_items(&segments.join("/"), items)
    }

    /// Tasks in `list_id` due within `[due_min, due_max]`.
    pub async fn list_tasks_for_list(
        &self,
        list_id: &str,
        due_min: &str,
        due_max: &str,
    ) -> ProviderResult<Vec<RawTask>> {
        let segments = ["lists", list_id, "tasks"];
        let query = [
            ("dueMin", due_min.to_string()),
            ("dueMax", due_max.to_string()),
        ];

        let items = self.api.list_items(&segments, &query).await?;

        api::decode_items(&segments.join("/"), items)
    }
}
