use chrono::{TimeZone, Utc};
use clinic_core::{
    open_storage, Appointment, Doctor, Patient, Record, StorageBackend, StorageFormat,
};
use std::path::Path;

const FORMATS: [StorageFormat; 2] = [StorageFormat::Json, StorageFormat::Xml];

fn roundtrip<T: Record + 'static>(format: StorageFormat, dir: &Path, records: &[T]) -> Vec<T> {
    let storage = open_storage::<T>(format, dir);
    storage.save(records).expect("save should succeed");
    storage.load().expect("load should succeed")
}

#[test]
fn doctors_roundtrip_in_order_for_both_formats() {
    let doctors = vec![
        Doctor {
            id: 3,
            name: "Zoe".to_string(),
        },
        Doctor {
            id: 1,
            name: "O'Brien & <Sons>".to_string(),
        },
        Doctor {
            id: 2,
            name: "Łukasz Müller".to_string(),
        },
    ];

    for format in FORMATS {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        assert_eq!(roundtrip(format, dir.path(), &doctors), doctors, "{format}");
    }
}

#[test]
fn patients_roundtrip_for_both_formats() {
    let patients = vec![
        Patient {
            id: 1,
            name: "Ann".to_string(),
        },
        Patient {
            id: 2,
            name: "Ben Carter".to_string(),
        },
    ];

    for format in FORMATS {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        assert_eq!(roundtrip(format, dir.path(), &patients), patients, "{format}");
    }
}

#[test]
fn appointments_roundtrip_with_subsecond_timestamps() {
    let base = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).single().expect("valid date");
    let appointments = vec![
        Appointment {
            id: 1,
            doctor_id: 1,
            patient_id: 2,
            date: base,
        },
        Appointment {
            id: 2,
            doctor_id: 99,
            patient_id: 7,
            date: base + chrono::Duration::nanoseconds(123_456_789),
        },
    ];

    for format in FORMATS {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        assert_eq!(
            roundtrip(format, dir.path(), &appointments),
            appointments,
            "{format}"
        );
    }
}

#[test]
fn empty_collection_roundtrips_for_both_formats() {
    for format in FORMATS {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        assert!(roundtrip::<Doctor>(format, dir.path(), &[]).is_empty(), "{format}");
    }
}

#[test]
fn load_of_missing_file_is_empty_for_both_formats() {
    for format in FORMATS {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let storage = open_storage::<Patient>(format, dir.path());
        assert!(!storage.path().exists());
        assert!(storage.load().expect("load should succeed").is_empty(), "{format}");
    }
}

#[test]
fn save_overwrites_previous_contents() {
    for format in FORMATS {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let storage = open_storage::<Doctor>(format, dir.path());
        let first = vec![
            Doctor {
                id: 1,
                name: "Alice".to_string(),
            },
            Doctor {
                id: 2,
                name: "Bob".to_string(),
            },
        ];
        storage.save(&first).expect("save should succeed");
        storage.save(&first[1..]).expect("save should succeed");

        assert_eq!(storage.load().expect("load should succeed"), first[1..].to_vec(), "{format}");
    }
}

#[test]
fn json_file_uses_original_field_names() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let storage = open_storage::<Appointment>(StorageFormat::Json, dir.path());
    storage
        .save(&[Appointment {
            id: 1,
            doctor_id: 2,
            patient_id: 3,
            date: Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).single().expect("valid date"),
        }])
        .expect("save should succeed");

    let text = std::fs::read_to_string(storage.path()).expect("file should be readable");
    let value: serde_json::Value = serde_json::from_str(&text).expect("file should be JSON");
    assert_eq!(
        value,
        serde_json::json!([
            {"Id": 1, "DoctorId": 2, "PatientId": 3, "Date": "2024-01-01T08:00:00Z"}
        ])
    );
}

#[test]
fn json_file_with_offsetless_dates_loads_as_utc() {
    let dir = tempfile::tempdir().expect("temp dir should be created");
    let storage = open_storage::<Appointment>(StorageFormat::Json, dir.path());
    std::fs::write(
        storage.path(),
        r#"[{"Id":4,"DoctorId":1,"PatientId":2,"Date":"2024-06-01T14:15:16.5"}]"#,
    )
    .expect("fixture should be written");

    let loaded = storage.load().expect("load should succeed");
    assert_eq!(loaded[0].id, 4);
    assert_eq!(
        loaded[0].date,
        Utc.with_ymd_and_hms(2024, 6, 1, 14, 15, 16).single().expect("valid date")
            + chrono::Duration::milliseconds(500)
    );
}

#[test]
fn names_with_edge_whitespace_roundtrip_for_both_formats() {
    let doctors = vec![
        Doctor {
            id: 1,
            name: " Alice ".to_string(),
        },
        Doctor {
            id: 2,
            name: "   ".to_string(),
        },
        Doctor {
            id: 3,
            name: "\ttabbed\r\n".to_string(),
        },
        Doctor {
            id: 4,
            name: "a  b".to_string(),
        },
    ];

    for format in FORMATS {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        assert_eq!(roundtrip(format, dir.path(), &doctors), doctors, "{format}");
    }
}
