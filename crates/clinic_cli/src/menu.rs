//! Interactive menus.
//!
//! # Responsibility
//! - Run the main menu and one add/remove/list loop per record kind.
//! - Describe each record kind as data (`EntityMenu`) fed to one generic loop.
//!
//! # Invariants
//! - End of input at any prompt ends the session without error.
//! - Store failures are reported to the user and the session continues.

use crate::console::Console;
use clinic_core::{
    open_storage, Appointment, AppointmentDraft, Doctor, DoctorDraft, Patient, PatientDraft,
    Record, RecordStore, StorageFormat, StoreResult,
};
use log::warn;
use std::io;
use std::path::Path;

pub const ADDED: &str = "Added successfully.";
pub const REMOVED: &str = "Removed successfully.";
pub const NOT_FOUND: &str = "Item not found.";
pub const NO_ITEMS: &str = "No items available.";
pub const INVALID_CHOICE: &str = "Invalid choice.";

/// Reads the user-supplied fields of one record; `None` on end of input.
pub type DraftReader<T> = fn(&mut Console<'_>) -> io::Result<Option<<T as Record>::Draft>>;

/// Per-kind menu description.
pub struct EntityMenu<T: Record> {
    pub plural: &'static str,
    pub read_draft: DraftReader<T>,
}

pub const DOCTORS: EntityMenu<Doctor> = EntityMenu {
    plural: "Doctors",
    read_draft: read_doctor,
};

pub const PATIENTS: EntityMenu<Patient> = EntityMenu {
    plural: "Patients",
    read_draft: read_patient,
};

pub const APPOINTMENTS: EntityMenu<Appointment> = EntityMenu {
    plural: "Appointments",
    read_draft: read_appointment,
};

fn read_doctor(console: &mut Console<'_>) -> io::Result<Option<DoctorDraft>> {
    Ok(console.prompt("Enter name: ")?.map(DoctorDraft::new))
}

fn read_patient(console: &mut Console<'_>) -> io::Result<Option<PatientDraft>> {
    Ok(console.prompt("Enter name: ")?.map(PatientDraft::new))
}

fn read_appointment(console: &mut Console<'_>) -> io::Result<Option<AppointmentDraft>> {
    let Some(doctor_id) = console.prompt_id("Enter doctor ID: ")? else {
        return Ok(None);
    };
    let Some(patient_id) = console.prompt_id("Enter patient ID: ")? else {
        return Ok(None);
    };
    Ok(Some(AppointmentDraft::new(doctor_id, patient_id)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntityAction {
    Add,
    Remove,
    List,
    Back,
}

impl EntityAction {
    /// Anything unrecognized means "back".
    fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => Self::Add,
            "2" => Self::Remove,
            "3" => Self::List,
            _ => Self::Back,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainChoice {
    Doctors,
    Patients,
    Appointments,
    Exit,
}

impl MainChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Doctors),
            "2" => Some(Self::Patients),
            "3" => Some(Self::Appointments),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// One store per record kind.
pub struct Clinic {
    pub doctors: RecordStore<Doctor>,
    pub patients: RecordStore<Patient>,
    pub appointments: RecordStore<Appointment>,
}

impl Clinic {
    /// Loads all three collections from `data_dir` in `format`.
    pub fn open(format: StorageFormat, data_dir: &Path) -> StoreResult<Self> {
        Ok(Self {
            doctors: RecordStore::open(open_storage(format, data_dir))?,
            patients: RecordStore::open(open_storage(format, data_dir))?,
            appointments: RecordStore::open(open_storage(format, data_dir))?,
        })
    }

    /// True when every collection writes through to a backing file.
    pub fn is_persistent(&self) -> bool {
        self.doctors.is_persistent()
            && self.patients.is_persistent()
            && self.appointments.is_persistent()
    }

    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            doctors: RecordStore::in_memory(),
            patients: RecordStore::in_memory(),
            appointments: RecordStore::in_memory(),
        }
    }
}

/// Asks for the storage encoding; `None` on end of input.
pub fn choose_storage(console: &mut Console<'_>) -> io::Result<Option<StorageFormat>> {
    console.say("Choose storage type: 1. JSON 2. XML")?;
    Ok(console
        .read_line()?
        .map(|answer| StorageFormat::from_choice(&answer)))
}

pub fn run_main_menu(console: &mut Console<'_>, clinic: &mut Clinic) -> io::Result<()> {
    loop {
        console.say("1. Manage Doctors\n2. Manage Patients\n3. Manage Appointments\n4. Exit")?;
        let Some(input) = console.read_line()? else {
            return Ok(());
        };
        match MainChoice::parse(&input) {
            Some(MainChoice::Doctors) => run_entity_menu(console, &mut clinic.doctors, &DOCTORS)?,
            Some(MainChoice::Patients) => {
                run_entity_menu(console, &mut clinic.patients, &PATIENTS)?
            }
            Some(MainChoice::Appointments) => {
                run_entity_menu(console, &mut clinic.appointments, &APPOINTMENTS)?
            }
            Some(MainChoice::Exit) => return Ok(()),
            None => console.say(INVALID_CHOICE)?,
        }
    }
}

pub fn run_entity_menu<T: Record>(
    console: &mut Console<'_>,
    store: &mut RecordStore<T>,
    menu: &EntityMenu<T>,
) -> io::Result<()> {
    let kind = T::KIND;
    loop {
        console.say(&format!(
            "1. Add {kind}\n2. Remove {kind}\n3. List {}\n4. Back",
            menu.plural
        ))?;
        let Some(input) = console.read_line()? else {
            return Ok(());
        };
        match EntityAction::parse(&input) {
            EntityAction::Add => {
                let Some(draft) = (menu.read_draft)(console)? else {
                    return Ok(());
                };
                match store.add(draft) {
                    Ok(_) => console.say(ADDED)?,
                    Err(err) => report_failure(console, kind, "add", &err)?,
                }
            }
            EntityAction::Remove => {
                let Some(id) = console.prompt_id("Enter ID: ")? else {
                    return Ok(());
                };
                match store.remove(id) {
                    Ok(Some(_)) => console.say(REMOVED)?,
                    Ok(None) => console.say(NOT_FOUND)?,
                    Err(err) => report_failure(console, kind, "remove", &err)?,
                }
            }
            EntityAction::List => print_listing(console, store)?,
            EntityAction::Back => return Ok(()),
        }
    }
}

fn print_listing<T: Record>(console: &mut Console<'_>, store: &RecordStore<T>) -> io::Result<()> {
    if store.is_empty() {
        return console.say(NO_ITEMS);
    }
    for record in store.list() {
        console.say(&format_row(record))?;
    }
    Ok(())
}

fn report_failure(
    console: &mut Console<'_>,
    kind: &str,
    action: &str,
    err: &dyn std::error::Error,
) -> io::Result<()> {
    warn!("event=menu_{action} module=cli status=error kind={kind} error={err}");
    console.say(&format!("Could not {action} {kind}: {err}"))
}

/// Renders `Id: 1\tName: Alice`.
pub fn format_row<T: Record>(record: &T) -> String {
    record
        .fields()
        .iter()
        .map(|field| format!("{}: {}", field.name, field.value))
        .collect::<Vec<_>>()
        .join("\t")
}
