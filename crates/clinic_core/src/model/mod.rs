//! Clinic record model.
//!
//! # Responsibility
//! - Define the record types managed by the clinic tool.
//! - Expose record identity and display fields through the `Record` trait
//!   instead of runtime property lookup.
//!
//! # Invariants
//! - Every record carries a positive integer `Id` once stored.
//! - Serialized field names are PascalCase (`Id`, `Name`, `DoctorId`, ...) so
//!   JSON and XML files stay compatible across implementations.

pub mod appointment;
pub mod doctor;
pub mod patient;
pub mod record;
mod timestamp;
