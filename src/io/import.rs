//! Archive import pipeline.
//!
//! The inverse of export: locate and deserialize the document entry,
//! restore file entries through the file store, and materialize the
//! document's records back into entities. A malformed record skips only
//! itself unless its section is marked strict; a malformed container aborts
//! the whole import.

use crate::io::codecs::CodecRegistry;
use crate::io::container::ArchiveReader;
use crate::io::traits::FileStore;
use crate::models::{ArchiveDocument, Dataset, SectionKind};
use crate::{Error, Result};
use std::io::{Read, Seek};
use tracing::{debug, warn};

/// What to do when a restored file already exists at its destination.
///
/// The policy applies identically to every entry of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Keep the existing file and skip the entry.
    #[default]
    Skip,
    /// Replace the existing file with the archived bytes.
    Overwrite,
}

/// Options for one import run.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Collision handling for restored files.
    pub collision: CollisionPolicy,
    /// Sections where a malformed record aborts the import instead of being
    /// skipped.
    pub strict_sections: Vec<String>,
}

impl ImportOptions {
    /// Sets the collision policy.
    #[must_use]
    pub fn with_collision(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    /// Marks a section as strict.
    #[must_use]
    pub fn with_strict_section(mut self, section: impl Into<String>) -> Self {
        self.strict_sections.push(section.into());
        self
    }

    /// Returns whether a section is marked strict.
    #[must_use]
    pub fn is_strict(&self, section: &str) -> bool {
        self.strict_sections.iter().any(|name| name == section)
    }
}

/// Paths touched while restoring file entries.
#[derive(Debug, Clone, Default)]
pub struct RestoreOutcome {
    /// Paths written to the file store.
    pub restored: Vec<String>,
    /// Paths skipped: existing files kept under [`CollisionPolicy::Skip`],
    /// or entries with an unsafe name.
    pub skipped: Vec<String>,
}

/// Post-hoc summary of one import run.
#[derive(Debug, Clone)]
pub struct ImportReport {
    /// Number of sections in the document.
    pub sections: usize,
    /// Number of records across all sections.
    pub records: usize,
    /// Paths restored into the file store.
    pub restored_files: Vec<String>,
    /// Paths skipped during restore.
    pub skipped_files: Vec<String>,
    /// Human-readable descriptions of skipped records.
    pub skipped_records: Vec<String>,
}

impl ImportReport {
    /// Returns whether anything was skipped.
    #[must_use]
    pub fn has_skips(&self) -> bool {
        !self.skipped_files.is_empty() || !self.skipped_records.is_empty()
    }
}

/// Service reconstructing datasets and files from archive containers.
pub struct ImportService {
    codecs: CodecRegistry,
}

impl ImportService {
    /// Creates an import service with the given registry.
    #[must_use]
    pub fn new(codecs: CodecRegistry) -> Self {
        Self { codecs }
    }

    /// Creates an import service with the standard registry.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(CodecRegistry::standard())
    }

    /// Reads the document entry of a container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedContainer`] when the container or its
    /// document entry is unreadable.
    pub fn read_document<R: Read + Seek>(&self, reader: R) -> Result<ArchiveDocument> {
        ArchiveReader::new(reader)?.document()
    }

    /// Restores every file entry of the container into the file store.
    ///
    /// # Errors
    ///
    /// Returns an error when an entry cannot be read or the store cannot be
    /// written; an entry with an unsafe name is skipped, not fatal.
    pub fn restore_files<R: Read + Seek>(
        &self,
        reader: &mut ArchiveReader<R>,
        store: &dyn FileStore,
        collision: CollisionPolicy,
    ) -> Result<RestoreOutcome> {
        let mut outcome = RestoreOutcome::default();
        for name in reader.file_entries() {
            if collision == CollisionPolicy::Skip && store.contains(&name) {
                debug!(path = %name, "existing file kept");
                outcome.skipped.push(name);
                continue;
            }
            let bytes = reader.read_entry(&name)?;
            match store.write(&name, &bytes) {
                Ok(()) => outcome.restored.push(name),
                Err(Error::InvalidInput(cause)) => {
                    warn!(path = %name, %cause, "skipping entry with unsafe path");
                    outcome.skipped.push(name);
                },
                Err(error) => return Err(error),
            }
        }
        Ok(outcome)
    }

    /// Materializes a document back into a dataset.
    ///
    /// Unknown sections are skipped with a warning; unknown fields are
    /// ignored by the codecs. Returns the dataset together with the
    /// descriptions of skipped records.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRecord`] when a record of a strict section
    /// fails to materialize.
    pub fn materialize(
        &self,
        document: &ArchiveDocument,
        options: &ImportOptions,
    ) -> Result<(Dataset, Vec<String>)> {
        let mut dataset = Dataset::new();
        let mut skipped = Vec::new();

        for (name, records) in document.iter() {
            let Some(kind) = SectionKind::parse(name) else {
                warn!(section = %name, "ignoring unknown section");
                continue;
            };
            let (entities, failures) = self.codecs.decode_section(kind, records);
            if let Some((index, cause)) = failures.first() {
                if options.is_strict(name) {
                    return Err(Error::MalformedRecord {
                        section: name.clone(),
                        index: *index,
                        cause: cause.to_string(),
                    });
                }
            }
            for (index, cause) in &failures {
                warn!(section = %name, index = *index, %cause, "skipping malformed record");
                skipped.push(format!("{name}[{index}]: {cause}"));
            }
            dataset.replace_section(entities);
        }

        Ok((dataset, skipped))
    }

    /// Runs the full import: document, files, then entities.
    ///
    /// # Errors
    ///
    /// Returns an error on a malformed container, an I/O failure, or a
    /// malformed record in a strict section.
    pub fn import<R: Read + Seek>(
        &self,
        reader: R,
        store: &dyn FileStore,
        options: &ImportOptions,
    ) -> Result<(Dataset, ImportReport)> {
        let mut archive = ArchiveReader::new(reader)?;
        let document = archive.document()?;
        let files = self.restore_files(&mut archive, store, options.collision)?;
        let (dataset, skipped_records) = self.materialize(&document, options)?;

        Ok((
            dataset,
            ImportReport {
                sections: document.section_count(),
                records: document.record_count(),
                restored_files: files.restored,
                skipped_files: files.skipped,
                skipped_records,
            },
        ))
    }
}

impl Default for ImportService {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn person_record(id: u64, first: &str, last: &str) -> Record {
        let mut record = Record::new();
        record.set("id", id);
        record.set("firstName", first);
        record.set("lastName", last);
        record
    }

    fn document_with_persons(records: Vec<Record>) -> ArchiveDocument {
        let mut document = ArchiveDocument::new();
        document.insert_section("persons", records);
        document
    }

    #[test]
    fn test_materialize_rebuilds_entities() {
        let document = document_with_persons(vec![
            person_record(1, "Ada", "Lovelace"),
            person_record(2, "Alan", "Turing"),
        ]);

        let (dataset, skipped) = ImportService::standard()
            .materialize(&document, &ImportOptions::default())
            .unwrap();
        assert!(skipped.is_empty());
        assert_eq!(dataset.persons.len(), 2);
        assert_eq!(dataset.persons[0].last_name, "Lovelace");
    }

    #[test]
    fn test_malformed_record_is_skipped_and_reported() {
        let mut broken = Record::new();
        broken.set("id", 3_u64);
        // no name fields
        let document =
            document_with_persons(vec![person_record(1, "Ada", "Lovelace"), broken]);

        let (dataset, skipped) = ImportService::standard()
            .materialize(&document, &ImportOptions::default())
            .unwrap();
        assert_eq!(dataset.persons.len(), 1);
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].starts_with("persons[1]:"));
    }

    #[test]
    fn test_strict_section_makes_malformed_record_fatal() {
        let mut broken = Record::new();
        broken.set("id", 3_u64);
        let document = document_with_persons(vec![broken]);

        let error = ImportService::standard()
            .materialize(
                &document,
                &ImportOptions::default().with_strict_section("persons"),
            )
            .unwrap_err();
        assert!(matches!(
            error,
            Error::MalformedRecord { section, index: 0, .. } if section == "persons"
        ));
    }

    #[test]
    fn test_unknown_section_is_ignored() {
        let mut document = document_with_persons(vec![person_record(1, "Ada", "Lovelace")]);
        document.insert_section("memberships", vec![Record::new()]);

        let (dataset, skipped) = ImportService::standard()
            .materialize(&document, &ImportOptions::default())
            .unwrap();
        assert!(skipped.is_empty());
        assert_eq!(dataset.persons.len(), 1);
    }

    #[test]
    fn test_collision_policy_is_exclusive_per_run() {
        assert_eq!(CollisionPolicy::default(), CollisionPolicy::Skip);
        let options = ImportOptions::default().with_collision(CollisionPolicy::Overwrite);
        assert_eq!(options.collision, CollisionPolicy::Overwrite);
    }
}
