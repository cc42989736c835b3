//! Collaborator traits for the archive pipeline.
//!
//! The pipeline reaches the persistence layer and the file store only
//! through [`DataProvider`] and [`FileStore`]; both are narrow, read-mostly
//! interfaces so the pipeline itself stays free of any storage technology.

use crate::Result;
use crate::models::{Dataset, SectionEntities, SectionKind};

/// Record fields whose string value names a file in the file store.
///
/// File references are distinguished from ordinary string fields only by
/// this fixed set of field names; packaging resolves each referenced path
/// exactly once.
pub const FILE_REFERENCE_FIELDS: &[&str] = &[
    "pathToDownloadablePDF",
    "pathToDownloadableAwardCertificate",
    "pathToLogo",
];

/// Read-only access to entity snapshots, one section at a time.
///
/// The pipeline never issues writes through this interface during export;
/// each export invocation reads one consistent snapshot of the provider.
pub trait DataProvider {
    /// Returns the sections this provider serves, in registration order.
    fn sections(&self) -> Vec<SectionKind>;

    /// Fetches every entity of one section.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::SourceRead`] when the underlying source
    /// cannot be queried; this aborts the whole export.
    fn fetch_all(&self, kind: SectionKind) -> Result<SectionEntities>;
}

/// The in-memory dataset is the canonical provider: fetching a section
/// clones its entities, so the caller works on a snapshot.
impl DataProvider for Dataset {
    fn sections(&self) -> Vec<SectionKind> {
        SectionKind::all().to_vec()
    }

    fn fetch_all(&self, kind: SectionKind) -> Result<SectionEntities> {
        Ok(match kind {
            SectionKind::Persons => SectionEntities::Persons(self.persons.clone()),
            SectionKind::Organizations => {
                SectionEntities::Organizations(self.organizations.clone())
            },
            SectionKind::Journals => SectionEntities::Journals(self.journals.clone()),
            SectionKind::Publications => SectionEntities::Publications(self.publications.clone()),
            SectionKind::TeachingActivities => {
                SectionEntities::TeachingActivities(self.teaching_activities.clone())
            },
            SectionKind::Projects => SectionEntities::Projects(self.projects.clone()),
        })
    }
}

/// Byte-level access to the external file store.
///
/// Paths are caller-supplied relative strings; implementations normalize
/// them and must never interpret them as absolute.
pub trait FileStore {
    /// Resolves a path to its bytes.
    ///
    /// Returns `Ok(None)` when the path names no file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read, or when the
    /// path is not a safe relative path. During export both outcomes are
    /// treated as a missing attachment, not as a fatal failure.
    fn resolve(&self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Writes bytes under a path, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidInput`] for unsafe paths and
    /// [`crate::Error::OperationFailed`] for I/O failures.
    fn write(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// Returns whether a file already exists under the path.
    fn contains(&self, path: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    #[test]
    fn test_dataset_serves_every_section() {
        let dataset = Dataset::new();
        let kinds = dataset.sections();
        assert_eq!(kinds.as_slice(), SectionKind::all());

        for kind in kinds {
            let entities = dataset.fetch_all(kind).unwrap();
            assert_eq!(entities.kind(), kind);
            assert!(entities.is_empty());
        }
    }

    #[test]
    fn test_fetch_all_returns_a_snapshot() {
        let mut dataset = Dataset::new();
        dataset.persons.push(Person {
            id: 1,
            first_name: "Lise".to_string(),
            last_name: "Meitner".to_string(),
            email: None,
            orcid: None,
        });

        let snapshot = dataset.fetch_all(SectionKind::Persons).unwrap();
        dataset.persons.clear();
        assert_eq!(snapshot.len(), 1);
    }
}
