pub mod rules;
pub mod service;

pub use crate::domain::model::{AppointmentRecord, ContactRecord, Entity};
pub use crate::domain::ports::RecordStore;
pub use crate::utils::error::Result;
pub use service::{AppointmentService, ContactService, RecordService};
