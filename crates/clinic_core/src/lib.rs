//! Core record management for the clinic console tool.
//! Owns record identity, persistence formats and store invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod storage;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::appointment::{Appointment, AppointmentDraft};
pub use model::doctor::{Doctor, DoctorDraft};
pub use model::patient::{Patient, PatientDraft};
pub use model::record::{Record, RecordField, RecordId};
pub use service::record_store::{RecordStore, StoreError, StoreResult};
pub use storage::{
    open_storage, JsonFileStorage, StorageBackend, StorageError, StorageFormat, StorageResult,
    XmlFileStorage,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
