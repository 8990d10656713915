//! Core types for nextday.
//!
//! This crate holds everything that does not touch the network:
//! - `dto` flat records written to snapshots
//! - `raw` the provider JSON shapes they are mapped from
//! - `mapper` the raw -> DTO conversions
//! - `date_window` the "tomorrow" window calculation
//! - `snapshot` JSON file output

pub mod date_window;
pub mod dto;
pub mod error;
pub mod mapper;
pub mod raw;
pub mod snapshot;

pub use date_window::DayWindow;
pub use dto::{Calendar, Event, EventStatus, Task, TaskList};
pub use error::{CoreError, CoreResult};
