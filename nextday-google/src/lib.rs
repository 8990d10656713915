//! Google Calendar and Google Tasks access for nextday.
//!
//! The provider manages its own credentials:
//!   credentials.json  OAuth client secret, downloaded from the Cloud console
//!   token.json        saved access/refresh token, rewritten on refresh

pub mod api;
pub mod app_config;
pub mod authenticate;
pub mod calendar;
pub mod error;
pub mod services;
pub mod session;
pub mod tasks;

pub use calendar::EventsService;
pub use error::{ProviderError, ProviderResult};
pub use services::{GoogleConfig, Services};
pub use tasks::TasksService;
