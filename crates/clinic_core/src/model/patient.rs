//! Patient record.

use super::record::{Record, RecordField, RecordId, UNASSIGNED_ID};
use serde::{Deserialize, Serialize};

/// A patient registered with the clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Patient {
    pub id: RecordId,
    #[serde(default, deserialize_with = "crate::model::record::null_as_empty")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
}

impl PatientDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Record for Patient {
    type Draft = PatientDraft;

    const KIND: &'static str = "Patient";
    const FILE_STEM: &'static str = "patients";
    const XML_ELEMENT: &'static str = "Patient";
    const XML_COLLECTION: &'static str = "ArrayOfPatient";

    fn from_draft(draft: PatientDraft) -> Self {
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
