//! # Labarchive
//!
//! Archive export/import and deterministic ordering for laboratory research
//! datasets.
//!
//! Labarchive serializes a full laboratory dataset (persons, organizations,
//! journals, publications, teaching activities, projects) into a
//! section-keyed document, attaches the binary files the records reference,
//! and packages both into a single portable zip container. The inverse
//! operation reconstructs the dataset and restores the files from the same
//! container.
//!
//! ## Features
//!
//! - Section-keyed, order-preserving archive document model
//! - Explicit per-section codecs (no reflection, stable schema)
//! - Best-effort file attachment: a missing file drops one field, never the
//!   whole export
//! - Composable, null-safe, total ordering chains for reproducible output
//! - Strict/lenient per-section import with post-hoc reports
//!
//! ## Example
//!
//! ```
//! use labarchive::models::{Dataset, Person};
//! use labarchive::ordering::chains;
//!
//! let mut people = vec![
//!     Person {
//!         id: 2,
//!         first_name: "Pierre".to_string(),
//!         last_name: "Curie".to_string(),
//!         email: None,
//!         orcid: None,
//!     },
//!     Person {
//!         id: 1,
//!         first_name: "Marie".to_string(),
//!         last_name: "Curie".to_string(),
//!         email: None,
//!         orcid: None,
//!     },
//! ];
//! chains::persons().sort(&mut people);
//! assert_eq!(people[0].first_name, "Marie");
//!
//! let mut dataset = Dataset::new();
//! dataset.persons = people;
//! assert_eq!(dataset.len(), 2);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod commands;
pub mod config;
pub mod io;
pub mod models;
pub mod ordering;
pub mod storage;

// Re-exports for convenience
pub use config::ArchiveConfig;
pub use io::{
    CollisionPolicy, DataProvider, ExportReport, ExportService, FileStore, ImportOptions,
    ImportReport, ImportService,
};
pub use models::{ArchiveDocument, Dataset, Record, SectionKind};
pub use ordering::{Direction, NullPolicy, OrderingChain};
pub use storage::DirectoryFileStore;

/// Error type for labarchive operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait
/// implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Bad CLI arguments, malformed config, unsafe file paths |
/// | `SourceRead` | The data provider cannot be queried; fatal to an export |
/// | `OperationFailed` | Sink, file store, or filesystem I/O fails; fatal |
/// | `MalformedContainer` | Container or its document entry is unreadable; fatal to an import |
/// | `MalformedRecord` | A record of a strict section fails to materialize |
///
/// A missing attachment or a malformed record of a lenient section is never
/// an `Error`: both are aggregated into the run's report and logged.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Reading entity snapshots from the data provider failed.
    #[error("reading section '{section}' failed: {cause}")]
    SourceRead {
        /// The section being fetched.
        section: String,
        /// The underlying cause.
        cause: String,
    },

    /// An I/O operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The container or its document entry is absent or unreadable.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// A record of a strict section failed to materialize.
    #[error("malformed record {index} in section '{section}': {cause}")]
    MalformedRecord {
        /// The section the record belongs to.
        section: String,
        /// Zero-based index of the record within its section.
        index: usize,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Creates an [`Error::OperationFailed`] from an operation name and any
    /// displayable cause.
    pub(crate) fn operation(operation: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.into(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for labarchive operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::operation("write_archive", "disk full");
        assert_eq!(err.to_string(), "operation 'write_archive' failed: disk full");

        let err = Error::MalformedRecord {
            section: "persons".to_string(),
            index: 3,
            cause: "missing required field 'id'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed record 3 in section 'persons': missing required field 'id'"
        );
    }
}
