//! Runtime settings.
//!
//! Every value has a default matching the fixed file layout in the working
//! directory. An optional `nextday.toml` and `NEXTDAY_*` environment
//! variables can override them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use nextday_google::GoogleConfig;
use nextday_google::calendar::CALENDAR_API_BASE;
use nextday_google::tasks::TASKS_API_BASE;
use serde::Deserialize;

pub const SETTINGS_FILE: &str = "nextday.toml";

/// Snapshot of mapped tasks for tomorrow
pub const TASKS_SNAPSHOT: &str = "out_next_day_tasks.json";
/// Snapshot of mapped events for tomorrow, across all calendars
pub const EVENTS_SNAPSHOT: &str = "out_next_day_short.json";
/// Raw task lists, as returned by the API
pub const TASK_LISTS_DUMP: &str = "task.json";
/// Raw upcoming-events response
pub const UPCOMING_DUMP: &str = "out.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub token_path: PathBuf,
    pub client_secret_path: PathBuf,
    pub output_dir: PathBuf,
    /// Time zone for the shared tasks window
    pub default_time_zone: String,
    pub calendar_api_base: String,
    pub tasks_api_base: String,
    pub upcoming_max_results: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            token_path: PathBuf::from("token.json"),
            client_secret_path: PathBuf::from("credentials.json"),
            output_dir: PathBuf::from("."),
            default_time_zone: "UTC".to_string(),
            calendar_api_base: CALENDAR_API_BASE.to_string(),
            tasks_api_base: TASKS_API_BASE.to_string(),
            upcoming_max_results: 10,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("NEXTDAY"))
            .build()
            .with_context(|| format!("Failed to read settings from {}", path.display()))?
            .try_deserialize()
            .context("Invalid settings")?;

        Ok(settings.expand_paths())
    }

    pub fn google(&self) -> GoogleConfig {
        GoogleConfig {
            token_path: self.token_path.clone(),
            client_secret_path: self.client_secret_path.clone(),
            calendar_api_base: self.calendar_api_base.clone(),
            tasks_api_base: self.tasks_api_base.clone(),
        }
    }

    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    fn expand_paths(mut self) -> Self {
        for path in [
            &mut self.token_path,
            &mut self.client_secret_path,
            &mut self.output_dir,
        ] {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
            *path = PathBuf::from(expanded);
        }
        self
    }
}
