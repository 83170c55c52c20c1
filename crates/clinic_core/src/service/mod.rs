//! Core use-case services.
//!
//! # Responsibility
//! - Own in-memory record collections and their identifier counters.
//! - Mirror every mutation to an optional storage backend.
//!
//! # See also
//! - `crate::storage` for the persistence contract.

pub mod record_store;
