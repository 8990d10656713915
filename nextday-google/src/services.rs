//! Service handles built once from the stored credential.

use std::path::PathBuf;

use crate::api::ApiClient;
use crate::calendar::{CALENDAR_API_BASE, EventsService};
use crate::error::ProviderResult;
use crate::session;
use crate::tasks::{TASKS_API_BASE, TasksService};

/// Where credentials live and which API hosts to talk to.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub token_path: PathBuf,
    pub client_secret_path: PathBuf,
    pub calendar_api_base: String,
    pub tasks_api_base: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        GoogleConfig {
            token_path: PathBuf::from("token.json"),
            client_secret_path: PathBuf::from("credentials.json"),
            calendar_api_base: CALENDAR_API_BASE.to_string(),
            tasks_api_base: TASKS_API_BASE.to_string(),
        }
    }
}

/// The events and tasks handles, passed by reference to every fetch.
#[derive(Debug, Clone)]
pub struct Services {
    pub events: EventsService,
    pub tasks: TasksService,
}

impl Services {
    /// Load or obtain a credential (possibly interactively) and build both handles.
    pub async fn init(config: &GoogleConfig) -> ProviderResult<Self> {
        let credential =
            session::obtain_credential(&config.token_path, &config.client_secret_path).await?;

        Ok(Self::with_access_token(config, &credential.access_token))
    }

    pub fn with_access_token(config: &GoogleConfig, access_token: &str) -> Self {
        Services {
            events: EventsService::new(ApiClient::new(
                config.calendar_api_base.clone(),
                access_token,
            )),
            tasks: TasksService::new(ApiClient::new(config.tasks_api_base.clone(), access_token)),
        }
    }
}
