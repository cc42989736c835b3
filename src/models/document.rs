//! Archive document tree.
//!
//! An [`ArchiveDocument`] is an ordered mapping from section name to a
//! sequence of [`Record`]s. A record is an ordered mapping from field name to
//! a JSON value (scalar, nested object, or array). Both levels preserve
//! insertion order through serialization so that exports are byte-for-byte
//! reproducible for the same input.
//!
//! Documents are always produced fresh from flat entity snapshots, never from
//! live object graphs, so the tree is guaranteed to be acyclic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Failure to read a required or mistyped field from a record.
///
/// Produced by the typed accessors on [`Record`] and surfaced per record
/// during materialization; a single failing record never aborts a whole
/// import unless its section is marked strict.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A required field is absent.
    #[error("missing required field '{0}'")]
    Missing(String),

    /// A field holds a value of the wrong type.
    #[error("field '{field}' is not a {expected}")]
    WrongType {
        /// The field name.
        field: String,
        /// The expected type description.
        expected: &'static str,
    },

    /// A field holds a value that fails domain validation.
    #[error("field '{field}' is not a valid {expected}: '{value}'")]
    Invalid {
        /// The field name.
        field: String,
        /// The expected value description.
        expected: &'static str,
        /// The offending raw value.
        value: String,
    },
}

impl FieldError {
    /// Creates a missing-field error.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::Missing(field.into())
    }

    /// Creates a wrong-type error.
    #[must_use]
    pub fn wrong_type(field: impl Into<String>, expected: &'static str) -> Self {
        Self::WrongType {
            field: field.into(),
            expected,
        }
    }

    /// Creates an invalid-value error.
    #[must_use]
    pub fn invalid(
        field: impl Into<String>,
        expected: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::Invalid {
            field: field.into(),
            expected,
            value: value.into(),
        }
    }
}

/// A single record: an ordered mapping from field name to value.
///
/// Field names are unique within a record (map semantics). Codecs write
/// records through [`Record::set`]/[`Record::set_opt`] and read them back
/// through the typed accessors; optional fields that are absent from an
/// entity are simply never written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether the record contains the named field.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Sets a field value.
    ///
    /// An existing field of the same name is replaced in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Sets a field value if present, writes nothing otherwise.
    pub fn set_opt<V: Into<Value>>(&mut self, name: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    /// Removes a field, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.shift_remove(name)
    }

    /// Returns the raw value of a field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns a field as a string slice, or `None` if absent or not a string.
    ///
    /// Infallible peek used when scanning for file references; codecs use the
    /// `opt_*`/`require_*` accessors instead so type mismatches are reported.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// Returns a required string field.
    pub fn require_str(&self, name: &str) -> Result<&str, FieldError> {
        match self.0.get(name) {
            None => Err(FieldError::missing(name)),
            Some(value) => value
                .as_str()
                .ok_or_else(|| FieldError::wrong_type(name, "string")),
        }
    }

    /// Returns a required unsigned integer field.
    pub fn require_u64(&self, name: &str) -> Result<u64, FieldError> {
        match self.0.get(name) {
            None => Err(FieldError::missing(name)),
            Some(value) => value
                .as_u64()
                .ok_or_else(|| FieldError::wrong_type(name, "number")),
        }
    }

    /// Returns a required 32-bit signed integer field (e.g. a year).
    pub fn require_i32(&self, name: &str) -> Result<i32, FieldError> {
        match self.0.get(name) {
            None => Err(FieldError::missing(name)),
            Some(value) => {
                let raw = value
                    .as_i64()
                    .ok_or_else(|| FieldError::wrong_type(name, "number"))?;
                i32::try_from(raw)
                    .map_err(|_| FieldError::invalid(name, "32-bit integer", raw.to_string()))
            },
        }
    }

    /// Returns an optional string field.
    pub fn opt_str(&self, name: &str) -> Result<Option<&str>, FieldError> {
        match self.0.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| FieldError::wrong_type(name, "string")),
        }
    }

    /// Returns an optional unsigned integer field.
    pub fn opt_u64(&self, name: &str) -> Result<Option<u64>, FieldError> {
        match self.0.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| FieldError::wrong_type(name, "number")),
        }
    }

    /// Returns an optional floating-point field.
    pub fn opt_f64(&self, name: &str) -> Result<Option<f64>, FieldError> {
        match self.0.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(Some)
                .ok_or_else(|| FieldError::wrong_type(name, "number")),
        }
    }

    /// Returns an optional ISO-8601 date field (`YYYY-MM-DD`).
    pub fn opt_date(&self, name: &str) -> Result<Option<chrono::NaiveDate>, FieldError> {
        match self.opt_str(name)? {
            None => Ok(None),
            Some(raw) => raw
                .parse::<chrono::NaiveDate>()
                .map(Some)
                .map_err(|_| FieldError::invalid(name, "date", raw)),
        }
    }

    /// Returns an array field of unsigned integers, empty if absent.
    pub fn u64_array(&self, name: &str) -> Result<Vec<u64>, FieldError> {
        match self.0.get(name) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .ok_or_else(|| FieldError::wrong_type(name, "array of numbers"))
                })
                .collect(),
            Some(_) => Err(FieldError::wrong_type(name, "array of numbers")),
        }
    }
}

/// The full archive document: an ordered mapping from section name to records.
///
/// Section names are unique within a document. Sections appear in
/// registration order and keep that order through serialization; a section
/// with zero records is still present as an empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArchiveDocument {
    sections: IndexMap<String, Vec<Record>>,
}

impl ArchiveDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a section, replacing any existing section of the same name.
    pub fn insert_section(&mut self, name: impl Into<String>, records: Vec<Record>) {
        self.sections.insert(name.into(), records);
    }

    /// Returns the records of a section.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&[Record]> {
        self.sections.get(name).map(Vec::as_slice)
    }

    /// Returns the number of sections.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Returns the total number of records across all sections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    /// Returns whether the document has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterates over sections in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Record>)> {
        self.sections.iter()
    }

    /// Iterates over sections in document order, with mutable records.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Vec<Record>)> {
        self.sections.iter_mut()
    }
}
