//! Zip container adapter.
//!
//! The archive container is a plain zip file: one distinguished entry
//! ([`DOCUMENT_ENTRY`]) holds the serialized document, every other entry
//! holds the raw bytes of an attached file under its original relative
//! path. File entries are always written before the document entry, so a
//! single-pass consumer discovers the attached files before it needs the
//! document.

use crate::models::ArchiveDocument;
use crate::{Error, Result};
use std::io::{Read, Seek, SeekFrom, Write};
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Name of the entry holding the serialized archive document.
pub const DOCUMENT_ENTRY: &str = "data.json";

/// Scoped access to the caller's sink.
///
/// Exposes only write, flush and seek; there is deliberately no close
/// operation, and dropping the guard flushes on every exit path. The sink's
/// lifecycle stays with the caller even though the zip writer finishes its
/// own stream.
pub struct ScopedSink<'a, W: Write + Seek> {
    inner: &'a mut W,
}

impl<'a, W: Write + Seek> ScopedSink<'a, W> {
    /// Wraps a caller-owned sink.
    #[must_use]
    pub fn new(inner: &'a mut W) -> Self {
        Self { inner }
    }
}

impl<W: Write + Seek> Write for ScopedSink<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

impl<W: Write + Seek> Seek for ScopedSink<'_, W> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl<W: Write + Seek> Drop for ScopedSink<'_, W> {
    fn drop(&mut self) {
        let _ = self.inner.flush();
    }
}

/// Writes one archive container to a caller-owned sink.
pub struct ArchiveWriter<'a, W: Write + Seek> {
    zip: ZipWriter<ScopedSink<'a, W>>,
    options: FileOptions,
    file_entries: usize,
}

impl<'a, W: Write + Seek> ArchiveWriter<'a, W> {
    /// Starts a container on the given sink.
    #[must_use]
    pub fn new(sink: &'a mut W) -> Self {
        Self {
            zip: ZipWriter::new(ScopedSink::new(sink)),
            options: FileOptions::default().compression_method(CompressionMethod::Deflated),
            file_entries: 0,
        }
    }

    /// Adds one attached file under its relative path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] when the sink cannot be written.
    pub fn add_file(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        self.zip
            .start_file(path, self.options)
            .map_err(|e| Error::operation("write_archive_entry", e))?;
        self.zip
            .write_all(bytes)
            .map_err(|e| Error::operation("write_archive_entry", e))?;
        self.file_entries += 1;
        Ok(())
    }

    /// Returns the number of file entries written so far.
    #[must_use]
    pub fn file_entries(&self) -> usize {
        self.file_entries
    }

    /// Writes the document entry last and finishes the container.
    ///
    /// Finishing flushes the caller's sink but never closes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] when serialization or the final
    /// write fails.
    pub fn finish(mut self, document: &ArchiveDocument) -> Result<()> {
        self.zip
            .start_file(DOCUMENT_ENTRY, self.options)
            .map_err(|e| Error::operation("write_document_entry", e))?;
        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| Error::operation("encode_document", e))?;
        self.zip
            .write_all(&bytes)
            .map_err(|e| Error::operation("write_document_entry", e))?;
        self.zip
            .finish()
            .map_err(|e| Error::operation("finish_archive", e))?;
        Ok(())
    }
}

/// Reads one archive container.
#[derive(Debug)]
pub struct ArchiveReader<R: Read + Seek> {
    zip: ZipArchive<R>,
}

impl<R: Read + Seek> ArchiveReader<R> {
    /// Opens a container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedContainer`] when the input is not a
    /// readable zip archive.
    pub fn new(reader: R) -> Result<Self> {
        let zip = ZipArchive::new(reader)
            .map_err(|e| Error::MalformedContainer(format!("not a readable archive: {e}")))?;
        Ok(Self { zip })
    }

    /// Locates and deserializes the document entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedContainer`] when the entry is absent or
    /// malformed.
    pub fn document(&mut self) -> Result<ArchiveDocument> {
        let entry = match self.zip.by_name(DOCUMENT_ENTRY) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => {
                return Err(Error::MalformedContainer(format!(
                    "container has no '{DOCUMENT_ENTRY}' entry"
                )));
            },
            Err(e) => return Err(Error::MalformedContainer(e.to_string())),
        };
        serde_json::from_reader(entry)
            .map_err(|e| Error::MalformedContainer(format!("malformed '{DOCUMENT_ENTRY}': {e}")))
    }

    /// Returns the names of all file entries, in container order.
    #[must_use]
    pub fn file_entries(&self) -> Vec<String> {
        self.zip
            .file_names()
            .filter(|name| *name != DOCUMENT_ENTRY && !name.ends_with('/'))
            .map(String::from)
            .collect()
    }

    /// Reads the bytes of one entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedContainer`] when the entry is absent and
    /// [`Error::OperationFailed`] when it cannot be read.
    pub fn read_entry(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut entry = self
            .zip
            .by_name(name)
            .map_err(|e| Error::MalformedContainer(format!("missing entry '{name}': {e}")))?;
        let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| Error::operation("read_archive_entry", e))?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use std::io::Cursor;

    fn sample_document() -> ArchiveDocument {
        let mut record = Record::new();
        record.set("id", 1_u64);
        record.set("name", "Nature");

        let mut document = ArchiveDocument::new();
        document.insert_section("journals", vec![record]);
        document.insert_section("projects", Vec::new());
        document
    }

    #[test]
    fn test_write_then_read_container() {
        let document = sample_document();
        let mut sink = Cursor::new(Vec::new());

        let mut writer = ArchiveWriter::new(&mut sink);
        writer.add_file("pdfs/a.pdf", b"%PDF-1.4").unwrap();
        writer.finish(&document).unwrap();

        sink.set_position(0);
        let mut reader = ArchiveReader::new(sink).unwrap();
        assert_eq!(reader.file_entries(), vec!["pdfs/a.pdf".to_string()]);
        assert_eq!(reader.read_entry("pdfs/a.pdf").unwrap(), b"%PDF-1.4");
        assert_eq!(reader.document().unwrap(), document);
    }

    #[test]
    fn test_document_entry_is_last() {
        let mut sink = Cursor::new(Vec::new());
        let mut writer = ArchiveWriter::new(&mut sink);
        writer.add_file("b.bin", &[1]).unwrap();
        writer.add_file("a.bin", &[2]).unwrap();
        writer.finish(&sample_document()).unwrap();

        sink.set_position(0);
        let mut zip = ZipArchive::new(sink).unwrap();
        let last_index = zip.len() - 1;
        let last = zip.by_index(last_index).unwrap();
        assert_eq!(last.name(), DOCUMENT_ENTRY);
    }

    #[test]
    fn test_missing_document_entry_is_malformed() {
        let mut sink = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut sink);
            zip.start_file("orphan.bin", FileOptions::default()).unwrap();
            zip.write_all(&[0]).unwrap();
            zip.finish().unwrap();
        }

        sink.set_position(0);
        let mut reader = ArchiveReader::new(sink).unwrap();
        let error = reader.document().unwrap_err();
        assert!(matches!(error, Error::MalformedContainer(_)));
    }

    #[test]
    fn test_garbage_input_is_malformed() {
        let error = ArchiveReader::new(Cursor::new(b"not a zip".to_vec())).unwrap_err();
        assert!(matches!(error, Error::MalformedContainer(_)));
    }

    #[test]
    fn test_finish_does_not_close_the_sink() {
        let mut sink = Cursor::new(Vec::new());
        ArchiveWriter::new(&mut sink)
            .finish(&sample_document())
            .unwrap();

        // The sink is still usable by the caller after the container is done.
        let end = sink.position();
        sink.write_all(b"trailer").unwrap();
        assert!(sink.position() > end);
    }
}
