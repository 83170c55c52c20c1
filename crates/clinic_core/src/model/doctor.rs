//! Doctor record.

use super::record::{Record, RecordField, RecordId, UNASSIGNED_ID};
use serde::{Deserialize, Serialize};

/// A doctor known to the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Doctor {
    pub id: RecordId,
    #[serde(default, deserialize_with = "crate::model::record::null_as_empty")]
    pub name: String,
}

/// User input for a new doctor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorDraft {
    pub name: String,
}

impl DoctorDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Record for Doctor {
    type Draft = DoctorDraft;

    const KIND: &'static str = "Doctor";
    const FILE_STEM: &'static str = "doctors";
    const XML_ELEMENT: &'static str = "Doctor";
    const XML_COLLECTION: &'static str = "ArrayOfDoctor";

    fn from_draft(draft: DoctorDraft) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: draft.name,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn fields(&self) -> Vec<RecordField> {
        vec![
            RecordField::new("Id", self.id),
            RecordField::new("Name", &self.name),
        ]
    }
}
