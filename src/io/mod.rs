//! Archive I/O subsystem.
//!
//! Exports the full dataset plus its attached files into a single portable
//! container, and imports such a container back into a dataset and restored
//! files.
//!
//! # Architecture
//!
//! - **Collaborator traits** ([`traits`]) — [`DataProvider`] abstracts the
//!   persistence layer, [`FileStore`] the external file storage.
//! - **Codecs** ([`codecs`]) — one explicit, reversible field mapping per
//!   entity kind, registered in a [`CodecRegistry`] together with the
//!   section's ordering chain.
//! - **Container** ([`container`]) — the zip adapter: file entries first,
//!   the document entry last, and a scoped sink guard that flushes but
//!   never closes the caller's sink.
//! - **Services** ([`export`], [`import`]) — orchestrate the pipelines and
//!   produce post-hoc reports for everything non-fatal.
//!
//! # Failure semantics
//!
//! | Condition | Effect |
//! |-----------|--------|
//! | Provider read failure | export aborts |
//! | Sink write failure | export aborts |
//! | Missing attachment | field dropped, reported, export continues |
//! | Malformed container | import aborts |
//! | Malformed record | record skipped, reported; fatal in strict sections |

pub mod codecs;
pub mod container;
pub mod export;
pub mod import;
pub mod traits;

// Re-exports for convenience
pub use codecs::{CodecRegistry, SectionCodec};
pub use container::{ArchiveReader, ArchiveWriter, DOCUMENT_ENTRY, ScopedSink};
pub use export::{ExportReport, ExportService};
pub use import::{CollisionPolicy, ImportOptions, ImportReport, ImportService, RestoreOutcome};
pub use traits::{DataProvider, FILE_REFERENCE_FIELDS, FileStore};
