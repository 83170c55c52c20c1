//! File persistence for record collections.
//!
//! # Responsibility
//! - Define the `StorageBackend` contract used by the record store.
//! - Provide interchangeable JSON and XML file encodings.
//!
//! # Invariants
//! - `save` rewrites the whole backing file with the full collection.
//! - `load` on a missing file returns an empty collection, not an error.
//! - `load(save(x)) == x` for both encodings, order included.

use crate::model::record::Record;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

mod json;
mod xml;

pub use json::JsonFileStorage;
pub use xml::XmlFileStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while reading or writing a backing file.
#[derive(Debug)]
pub enum StorageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Serialize {
        path: PathBuf,
        message: String,
    },
    Deserialize {
        path: PathBuf,
        message: String,
    },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn serialize(path: &Path, message: impl Display) -> Self {
        Self::Serialize {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub(crate) fn deserialize(path: &Path, message: impl Display) -> Self {
        Self::Deserialize {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    /// Stable short code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "io_failed",
            Self::Serialize { .. } => "serialize_failed",
            Self::Deserialize { .. } => "deserialize_failed",
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error at `{}`: {source}", path.display()),
            Self::Serialize { path, message } => {
                write!(f, "failed to encode `{}`: {message}", path.display())
            }
            Self::Deserialize { path, message } => {
                write!(f, "malformed data file `{}`: {message}", path.display())
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Serialize { .. } | Self::Deserialize { .. } => None,
        }
    }
}

/// Encoding used for backing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFormat {
    Json,
    Xml,
}

impl StorageFormat {
    /// Maps the startup prompt answer: `1` selects JSON, anything else XML.
    pub fn from_choice(choice: &str) -> Self {
        if choice.trim() == "1" {
            Self::Json
        } else {
            Self::Xml
        }
    }

    /// Parses a configured format name (`json` or `xml`, any case).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// Returns `<stem>.json` or `<stem>.xml`.
    pub fn file_name(self, stem: &str) -> String {
        format!("{stem}.{}", self.as_str())
    }
}

impl Display for StorageFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistence contract for one homogeneous record collection.
pub trait StorageBackend<T: Record> {
    /// Overwrites the backing file with `records`.
    fn save(&self, records: &[T]) -> StorageResult<()>;

    /// Reads the full collection; a missing file yields an empty one.
    fn load(&self) -> StorageResult<Vec<T>>;

    fn format(&self) -> StorageFormat;

    fn path(&self) -> &Path;
}

/// Builds the backend for `T` inside `data_dir`, named after `T::FILE_STEM`.
pub fn open_storage<T: Record + 'static>(
    format: StorageFormat,
    data_dir: impl AsRef<Path>,
) -> Box<dyn StorageBackend<T>> {
    let path = data_dir.as_ref().join(format.file_name(T::FILE_STEM));
    match format {
        StorageFormat::Json => Box::new(JsonFileStorage::new(path)),
        StorageFormat::Xml => Box::new(XmlFileStorage::new(path)),
    }
}

/// Reads a backing file, mapping "not found" to `None`.
///
/// Empty or whitespace-only files are treated like missing ones.
pub(crate) fn read_existing(path: &Path) -> StorageResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => Ok(None),
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(StorageError::io(path, err)),
    }
}

pub(crate) fn write_all(path: &Path, contents: &str) -> StorageResult<()> {
    std::fs::write(path, contents).map_err(|err| StorageError::io(path, err))
}

/// Emits one `storage_save`/`storage_load` event for a finished operation.
pub(crate) fn log_outcome<R>(
    event: &'static str,
    format: StorageFormat,
    path: &Path,
    started_at: Instant,
    result: &StorageResult<R>,
    records: usize,
) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!(
            "event={event} module=storage status=ok format={format} records={records} duration_ms={duration_ms} path={}",
            path.display()
        ),
        Err(err) => error!(
            "event={event} module=storage status=error format={format} duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
    }
}
