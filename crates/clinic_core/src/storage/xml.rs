//! XML file backend.
//!
//! Layout: `<ArrayOfDoctor><Doctor><Id>1</Id><Name>..</Name></Doctor>..</ArrayOfDoctor>`.
//! Root attributes and inter-element whitespace are ignored on load.
//!
//! The reader trims raw text before unescaping, so whitespace at the edges of
//! a value is written as character references (`&#x20;`) to survive a reload.

use super::{log_outcome, read_existing, write_all, StorageBackend, StorageError};
use super::{StorageFormat, StorageResult};
use crate::model::record::Record;
use serde::de::DeserializeOwned;
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::Instant;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

/// Write-side view: one `T::XML_ELEMENT` child per record.
struct CollectionRef<'a, T> {
    records: &'a [T],
}

impl<T: Record> Serialize for CollectionRef<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct(T::XML_COLLECTION, 1)?;
        state.serialize_field(T::XML_ELEMENT, self.records)?;
        state.end()
    }
}

/// Read-side view: every child element of the root is one record.
#[derive(Deserialize)]
#[serde(bound(deserialize = "T: DeserializeOwned"))]
struct Collection<T> {
    #[serde(rename = "$value", default)]
    records: Vec<T>,
}

/// Stores a collection as one XML document.
#[derive(Debug, Clone)]
pub struct XmlFileStorage {
    path: PathBuf,
}

impl XmlFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn encode<T: Record>(&self, records: &[T]) -> StorageResult<()> {
        let body =
            quick_xml::se::to_string_with_root(T::XML_COLLECTION, &CollectionRef { records })
                .map_err(|err| StorageError::serialize(&self.path, err))?;
        let body = protect_edge_whitespace(&body);
        write_all(&self.path, &format!("{XML_DECLARATION}\n{body}\n"))
    }

    fn decode<T: Record>(&self) -> StorageResult<Vec<T>> {
        let Some(text) = read_existing(&self.path)? else {
            return Ok(Vec::new());
        };
        let collection: Collection<T> = quick_xml::de::from_str(&text)
            .map_err(|err| StorageError::deserialize(&self.path, err))?;
        Ok(collection.records)
    }
}

/// Replaces whitespace at the start and end of every text node in compact
/// serializer output with numeric character references.
///
/// Compact output has no text outside leaf elements and escapes `<`/`>` inside
/// text, so every run between `>` and `<` is one value.
fn protect_edge_whitespace(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut rest = body;
    while let Some(open) = rest.find('<') {
        let (text, tail) = rest.split_at(open);
        push_text(&mut out, text);
        let close = tail.find('>').map_or(tail.len(), |index| index + 1);
        out.push_str(&tail[..close]);
        rest = &tail[close..];
    }
    push_text(&mut out, rest);
    out
}

fn push_text(out: &mut String, text: &str) {
    let start = text.len() - text.trim_start_matches(is_xml_whitespace).len();
    let end = text.trim_end_matches(is_xml_whitespace).len().max(start);
    push_char_refs(out, &text[..start]);
    out.push_str(&text[start..end]);
    push_char_refs(out, &text[end..]);
}

fn push_char_refs(out: &mut String, text: &str) {
    for ch in text.chars() {
        // Writing into a String can't fail.
        let _ = write!(out, "&#x{:X};", u32::from(ch));
    }
}

fn is_xml_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

impl<T: Record> StorageBackend<T> for XmlFileStorage {
    fn save(&self, records: &[T]) -> StorageResult<()> {
        let started_at = Instant::now();
        let result = self.encode(records);
        log_outcome(
            "storage_save",
            StorageFormat::Xml,
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
            StorageFormat::Xml,
            &self.path,
            started_at,
            &result,
            count,
        );
        result
    }

    fn format(&self) -> StorageFormat {
        StorageFormat::Xml
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::{protect_edge_whitespace, XmlFileStorage};
    use crate::model::doctor::Doctor;
    use crate::storage::{StorageBackend, StorageError};

    #[test]
    fn save_writes_declaration_and_named_elements() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("doctors.xml");
        let storage = XmlFileStorage::new(&path);

        let doctors = [Doctor {
            id: 1,
            name: "Alice".to_string(),
        }];
        StorageBackend::<Doctor>::save(&storage, &doctors).expect("save should succeed");

        let text = std::fs::read_to_string(&path).expect("file should be readable");
        assert!(text.starts_with("<?xml"));
        assert!(text.contains("<ArrayOfDoctor>"));
        assert!(text.contains("<Id>1</Id>"));
        assert!(text.contains("<Name>Alice</Name>"));
    }

    #[test]
    fn load_accepts_indented_documents_with_namespace_attributes() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("doctors.xml");
        std::fs::write(
            &path,
            r#"<?xml version="1.0" encoding="utf-8"?>
<ArrayOfDoctor xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <Doctor>
    <Id>4</Id>
    <Name>Alice</Name>
  </Doctor>
  <Doctor>
    <Id>5</Id>
    <Name>Bob</Name>
  </Doctor>
</ArrayOfDoctor>
"#,
        )
        .expect("fixture should be written");

        let storage = XmlFileStorage::new(&path);
        let doctors = StorageBackend::<Doctor>::load(&storage).expect("load should succeed");
        assert_eq!(doctors.len(), 2);
        assert_eq!(doctors[0].id, 4);
        assert_eq!(doctors[1].name, "Bob");
    }

    #[test]
    fn edge_whitespace_becomes_char_refs() {
        assert_eq!(
            protect_edge_whitespace("<D><Name> Al ice\t</Name><Id>1</Id></D>"),
            "<D><Name>&#x20;Al ice&#x9;</Name><Id>1</Id></D>"
        );
        assert_eq!(
            protect_edge_whitespace("<Name>  </Name>"),
            "<Name>&#x20;&#x20;</Name>"
        );
        assert_eq!(protect_edge_whitespace("<Empty/>"), "<Empty/>");
    }

    #[test]
    fn padded_names_survive_reload() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let storage = XmlFileStorage::new(dir.path().join("doctors.xml"));
        let doctors = [
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
                name: "line\n".to_string(),
            },
        ];

        StorageBackend::<Doctor>::save(&storage, &doctors).expect("save should succeed");
        let loaded = StorageBackend::<Doctor>::load(&storage).expect("load should succeed");
        assert_eq!(loaded, doctors);
    }

    #[test]
    fn missing_name_element_loads_as_empty_name() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("doctors.xml");
        std::fs::write(&path, "<ArrayOfDoctor><Doctor><Id>1</Id></Doctor></ArrayOfDoctor>")
            .expect("fixture should be written");

        let storage = XmlFileStorage::new(&path);
        let doctors = StorageBackend::<Doctor>::load(&storage).expect("load should succeed");
        assert_eq!(
            doctors,
            vec![Doctor {
                id: 1,
                name: String::new(),
            }]
        );
    }

    #[test]
    fn load_rejects_malformed_document() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("doctors.xml");
        std::fs::write(&path, "<ArrayOfDoctor><Doctor><Id>x</Id></Doctor>")
            .expect("fixture should be written");

        let storage = XmlFileStorage::new(&path);
        let err = StorageBackend::<Doctor>::load(&storage)
            .expect_err("malformed file should fail to load");
        assert!(matches!(err, StorageError::Deserialize { .. }));
    }
}
