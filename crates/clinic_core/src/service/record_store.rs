//! Generic in-memory record store with write-through persistence.
//!
//! # Responsibility
//! - Assign identifiers and keep records in insertion order.
//! - Persist the full collection after every successful mutation.
//!
//! # Invariants
//! - Ids are unique and strictly increasing; removed ids are never reused
//!   within one store instance.
//! - After `open`, the next id is `max(existing ids) + 1`, or 1 when empty.
//! - A failed write-through leaves memory and the id counter unchanged.

use crate::model::record::{Record, RecordId};
use crate::storage::{StorageBackend, StorageError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FIRST_ID: RecordId = 1;

pub type StoreResult<T> = Result<T, StoreError>;

/// Record store failure.
#[derive(Debug)]
pub enum StoreError {
    /// Backend failed to load or save the collection.
    Storage(StorageError),
    /// No identifiers left for the record kind.
    IdSpaceExhausted { kind: &'static str },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::IdSpaceExhausted { kind } => write!(f, "no identifiers left for {kind} records"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::IdSpaceExhausted { .. } => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Ordered collection of one record type.
pub struct RecordStore<T: Record> {
    records: Vec<T>,
    next_id: RecordId,
    storage: Option<Box<dyn StorageBackend<T>>>,
}

impl<T: Record> RecordStore<T> {
    /// Creates an empty store with no backing file.
    pub fn in_memory() -> Self {
        Self {
            records: Vec::new(),
            next_id: FIRST_ID,
            storage: None,
        }
    }

    /// Loads the existing collection from `storage` and continues its ids.
    ///
    /// # Errors
    /// - Returns `StoreError::Storage` when the backing file can't be read or
    ///   parsed.
    pub fn open(storage: Box<dyn StorageBackend<T>>) -> StoreResult<Self> {
        let records = storage.load()?;
        let next_id = match records.iter().map(Record::id).max() {
            Some(max_id) => max_id
                .checked_add(1)
                .ok_or(StoreError::IdSpaceExhausted { kind: T::KIND })?,
            None => FIRST_ID,
        };
        info!(
            "event=store_open module=store status=ok kind={} format={} records={} next_id={}",
            T::KIND,
            storage.format(),
            records.len(),
            next_id
        );
        Ok(Self {
            records,
            next_id,
            storage: Some(storage),
        })
    }

    /// Stores a new record built from `draft` and returns its id.
    ///
    /// # Errors
    /// - `IdSpaceExhausted` when the counter can't advance.
    /// - `Storage` when write-through fails; the record is not kept.
    pub fn add(&mut self, draft: T::Draft) -> StoreResult<RecordId> {
        let id = self.next_id;
        let following = id
            .checked_add(1)
            .ok_or(StoreError::IdSpaceExhausted { kind: T::KIND })?;

        let mut record = T::from_draft(draft);
        record.set_id(id);
        self.records.push(record);

        if let Err(err) = self.persist() {
            self.records.pop();
            error!(
                "event=record_add module=store status=error kind={} id={} error_code={}",
                T::KIND,
                id,
                err.code()
            );
            return Err(err.into());
        }

        self.next_id = following;
        info!(
            "event=record_add module=store status=ok kind={} id={}",
            T::KIND,
            id
        );
        Ok(id)
    }

    /// Removes the first record with `id`.
    ///
    /// Returns `Ok(None)` when nothing matches; that is not an error.
    ///
    /// # Errors
    /// - `Storage` when write-through fails; the record is put back.
    pub fn remove(&mut self, id: RecordId) -> StoreResult<Option<T>> {
        let Some(index) = self.records.iter().position(|record| record.id() == id) else {
            info!(
                "event=record_remove module=store status=not_found kind={} id={}",
                T::KIND,
                id
            );
            return Ok(None);
        };

        let removed = self.records.remove(index);
        if let Err(err) = self.persist() {
            self.records.insert(index, removed);
            error!(
                "event=record_remove module=store status=error kind={} id={} error_code={}",
                T::KIND,
                id,
                err.code()
            );
            return Err(err.into());
        }

        info!(
            "event=record_remove module=store status=ok kind={} id={}",
            T::KIND,
            id
        );
        Ok(Some(removed))
    }

    /// Iterates all records in insertion order.
    pub fn list(&self) -> impl Iterator<Item = &T> + '_ {
        self.records.iter()
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next `add` will assign.
    pub fn next_id(&self) -> RecordId {
        self.next_id
    }

    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }

    fn persist(&self) -> Result<(), StorageError> {
        match &self.storage {
            Some(storage) => storage.save(&self.records),
            None => Ok(()),
        }
    }
}

impl<T: Record> Default for RecordStore<T> {
    fn default() -> Self {
        Self::in_memory()
    }
}
