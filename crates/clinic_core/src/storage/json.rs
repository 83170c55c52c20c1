//! JSON file backend: a top-level array of PascalCase-keyed objects.

use super::{log_outcome, read_existing, write_all, StorageBackend, StorageError};
use super::{StorageFormat, StorageResult};
use crate::model::record::Record;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Stores a collection as one JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn encode<T: Record>(&self, records: &[T]) -> StorageResult<()> {
        let text = serde_json::to_string_pretty(records)
            .map_err(|err| StorageError::serialize(&self.path, err))?;
        write_all(&self.path, &text)
    }

    fn decode<T: Record>(&self) -> StorageResult<Vec<T>> {
        match read_existing(&self.path)? {
            Some(text) => serde_json::from_str(&text)
                .map_err(|err| StorageError::deserialize(&self.path, err)),
            None => Ok(Vec::new()),
        }
    }
}

impl<T: Record> StorageBackend<T> for JsonFileStorage {
    fn save(&self, records: &[T]) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.encode(records);
        log_outcome(
            "storage_save",
            StorageFormat::Json,
            &self.path,
            started_at,
            &result,
            records.len(),
        );
        result
    }

    fn load(&self) -> StorageResult<Vec<T>> {
        let started_at = Instant::now();
        let result = self.decode::<T>();
        let count = result.as_ref().map_or(0, Vec::len);
        log_outcome(
            "storage_load",
            StorageFormat::Json,
            &self.path,
            started_at,
            &result,
            count,
        );
        result
    }

    fn format(&self) -> StorageFormat {
        StorageFormat::Json
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
