//! nextday: snapshot tomorrow's Google Calendar events and Google Tasks to JSON.

pub mod commands;
pub mod settings;

pub use settings::Settings;
