//! Record capability shared by every stored entity.
//!
//! # Responsibility
//! - Give the generic store typed access to a record's identifier.
//! - Describe how a record is named on disk and rendered for display.
//!
//! # Invariants
//! - `from_draft` leaves the id unassigned (`0`); only the store assigns ids.
//! - `fields()` always starts with `Id` and keeps a stable order.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Debug;

/// Integer identifier assigned by a record store, starting at 1.
pub type RecordId = u32;

/// Placeholder id carried by records that have not been stored yet.
pub const UNASSIGNED_ID: RecordId = 0;

/// One named value of a record, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    pub name: &'static str,
    pub value: String,
}

impl RecordField {
    pub fn new(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }
}

/// Static capability implemented by Doctor, Patient and Appointment.
pub trait Record: Clone + Debug + PartialEq + Serialize + DeserializeOwned {
    /// Fields supplied by the user when adding a record.
    type Draft;

    /// Singular display name, e.g. `Doctor`.
    const KIND: &'static str;
    /// Data file name without extension, e.g. `doctors`.
    const FILE_STEM: &'static str;
    /// XML element name of one record.
    const XML_ELEMENT: &'static str;
    /// XML root element name of a collection.
    const XML_COLLECTION: &'static str;

    /// Builds an unstored record from user input.
    fn from_draft(draft: Self::Draft) -> Self;

    fn id(&self) -> RecordId;

    fn set_id(&mut self, id: RecordId);

    /// Returns `name: value` pairs for listing.
    fn fields(&self) -> Vec<RecordField>;
}

/// Reads a text field that older files may leave out or write as `null`.
///
/// Pair with `#[serde(default)]` so a missing element also loads as `""`.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
