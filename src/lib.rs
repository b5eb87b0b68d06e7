pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{JsonFileStore, MemoryStore};
pub use crate::core::{AppointmentService, ContactService, RecordService};
pub use domain::model::{
    AppointmentId, AppointmentRecord, ContactId, ContactRecord, NewAppointment, NewContact,
};
pub use domain::ports::RecordStore;
pub use utils::error::{RecordError, Result};
