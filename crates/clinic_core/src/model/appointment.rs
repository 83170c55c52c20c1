//! Appointment record.
//!
//! # Invariants
//! - `doctor_id` and `patient_id` are not checked against existing records.
//! - `date` is stored in UTC.

use super::record::{Record, RecordField, RecordId, UNASSIGNED_ID};
use super::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled visit linking a doctor and a patient by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Appointment {
    pub id: RecordId,
    pub doctor_id: RecordId,
    pub patient_id: RecordId,
    #[serde(with = "crate::model::timestamp")]
    pub date: DateTime<Utc>,
}

/// User input for a new appointment.
///
/// `date = None` means "now" at the moment the record is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub doctor_id: RecordId,
    pub patient_id: RecordId,
    pub date: Option<DateTime<Utc>>,
}

impl AppointmentDraft {
    pub fn new(doctor_id: RecordId, patient_id: RecordId) -> Self {
        Self {
            doctor_id,
            patient_id,
            date: None,
        }
    }

    pub fn at(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }
}

impl Record for Appointment {
    type Draft = AppointmentDraft;

    const KIND: &'static str = "Appointment";
    const FILE_STEM: &'static str = "appointments";
    const XML_ELEMENT: &'static str = "Appointment";
    const XML_COLLECTION: &'static str = "ArrayOfAppointment";

    fn from_draft(draft: AppointmentDraft) -> Self {
        Self {
            id: UNASSIGNED_ID,
            doctor_id: draft.doctor_id,
            patient_id: draft.patient_id,
            date: draft.date.unwrap_or_else(Utc::now),
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
            RecordField::new("DoctorId", self.doctor_id),
            RecordField::new("PatientId", self.patient_id),
            RecordField::new("Date", timestamp::to_text(&self.date)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::{Appointment, AppointmentDraft};
    use crate::model::record::Record;
    use chrono::{TimeZone, Utc};

    #[test]
    fn from_draft_defaults_date_to_now() {
        let before = Utc::now();
        let appointment = Appointment::from_draft(AppointmentDraft::new(1, 2));
        let after = Utc::now();

        assert!(appointment.date >= before && appointment.date <= after);
        assert_eq!(appointment.doctor_id, 1);
        assert_eq!(appointment.patient_id, 2);
    }

    #[test]
    fn json_uses_original_field_names() {
        let appointment = Appointment {
            id: 1,
            doctor_id: 4,
            patient_id: 9,
            date: Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).single().expect("valid date"),
        };
        let json = serde_json::to_string(&appointment).expect("serialization should succeed");
        assert_eq!(
            json,
            r#"{"Id":1,"DoctorId":4,"PatientId":9,"Date":"2024-03-15T09:00:00Z"}"#
        );
    }

    #[test]
    fn fields_render_in_declaration_order() {
        let appointment = Appointment {
            id: 2,
            doctor_id: 1,
            patient_id: 3,
            date: Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).single().expect("valid date"),
        };
        let names: Vec<_> = appointment.fields().iter().map(|f| f.name).collect();
        assert_eq!(names, ["Id", "DoctorId", "PatientId", "Date"]);
    }
}
