//! Archive export pipeline.
//!
//! Orchestrates the full export: snapshot the provider into a document,
//! resolve file references through the file store, and package both into a
//! zip container on a caller-owned sink. Missing attachments are
//! best-effort by design: the field is dropped from the record, the export
//! continues, and the omission shows up only in the report and the log.

use crate::io::codecs::CodecRegistry;
use crate::io::container::ArchiveWriter;
use crate::io::traits::{DataProvider, FILE_REFERENCE_FIELDS, FileStore};
use crate::models::ArchiveDocument;
use crate::Result;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::io::{Seek, Write};
use tracing::{debug, warn};

/// Post-hoc summary of one export run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Number of sections in the document.
    pub sections: usize,
    /// Number of records across all sections.
    pub records: usize,
    /// Number of file entries written into the container.
    pub attached_files: usize,
    /// File-reference paths that could not be resolved, one per dropped
    /// field occurrence.
    pub dropped_attachments: Vec<String>,
}

impl ExportReport {
    /// Returns whether any attachment was dropped.
    #[must_use]
    pub fn has_dropped_attachments(&self) -> bool {
        !self.dropped_attachments.is_empty()
    }
}

/// Service producing archive containers from a data provider.
pub struct ExportService {
    codecs: CodecRegistry,
}

impl ExportService {
    /// Creates an export service with the given registry.
    #[must_use]
    pub fn new(codecs: CodecRegistry) -> Self {
        Self { codecs }
    }

    /// Creates an export service with the standard registry and chains.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(CodecRegistry::standard())
    }

    /// Snapshots the provider into an archive document.
    ///
    /// Sections are queried in registration order; each section's entities
    /// are sorted with the section's ordering chain before encoding, so
    /// repeated invocations over the same data emit identical documents. A
    /// section with zero entities still appears, as an empty sequence.
    ///
    /// # Errors
    ///
    /// Propagates the provider's read failure, which aborts the export.
    pub fn build_document(&self, provider: &dyn DataProvider) -> Result<ArchiveDocument> {
        let mut document = ArchiveDocument::new();
        for kind in provider.sections() {
            let entities = provider.fetch_all(kind)?;
            let records = self.codecs.encode_section(entities);
            debug!(section = %kind, records = records.len(), "section encoded");
            document.insert_section(kind.name(), records);
        }
        Ok(document)
    }

    /// Packages a document and its attached files into a container.
    ///
    /// Every record's fields are scanned for file references; each
    /// referenced path is resolved exactly once. Resolved files become
    /// container entries under their original relative path, written before
    /// the document entry. An unresolvable reference drops its field from
    /// the record and is reported, never raised. The sink is flushed but
    /// not closed; its lifecycle stays with the caller.
    ///
    /// # Errors
    ///
    /// Returns an error when the container cannot be written to the sink.
    pub fn package<W: Write + Seek>(
        &self,
        mut document: ArchiveDocument,
        files: &dyn FileStore,
        sink: &mut W,
    ) -> Result<ExportReport> {
        let mut resolved: IndexMap<String, Vec<u8>> = IndexMap::new();
        let mut missing: HashSet<String> = HashSet::new();
        let mut dropped: Vec<String> = Vec::new();

        for (section, records) in document.iter_mut() {
            for record in records.iter_mut() {
                for &field in FILE_REFERENCE_FIELDS {
                    let Some(path) = record.str_field(field).map(str::to_owned) else {
                        continue;
                    };
                    if resolved.contains_key(&path) {
                        continue;
                    }
                    if missing.contains(&path) {
                        record.remove(field);
                        dropped.push(path);
                        continue;
                    }
                    match files.resolve(&path) {
                        Ok(Some(bytes)) => {
                            resolved.insert(path, bytes);
                        },
                        Ok(None) => {
                            warn!(section = %section, field, path = %path, "attachment not found, dropping field");
                            missing.insert(path.clone());
                            record.remove(field);
                            dropped.push(path);
                        },
                        Err(error) => {
                            warn!(section = %section, field, path = %path, %error, "attachment unreadable, dropping field");
                            missing.insert(path.clone());
                            record.remove(field);
                            dropped.push(path);
                        },
                    }
                }
            }
        }

        let mut writer = ArchiveWriter::new(sink);
        for (path, bytes) in &resolved {
            writer.add_file(path, bytes)?;
        }
        writer.finish(&document)?;

        Ok(ExportReport {
            sections: document.section_count(),
            records: document.record_count(),
            attached_files: resolved.len(),
            dropped_attachments: dropped,
        })
    }

    /// Builds the document and packages it in one pass.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider cannot be read or the sink cannot
    /// be written.
    pub fn export<W: Write + Seek>(
        &self,
        provider: &dyn DataProvider,
        files: &dyn FileStore,
        sink: &mut W,
    ) -> Result<ExportReport> {
        let document = self.build_document(provider)?;
        self.package(document, files, sink)
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::standard()
    }
}
