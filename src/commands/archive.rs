//! Export, import and inspect command handlers.

// CLI output goes to stdout by design.
#![allow(clippy::print_stdout)]

use crate::config::ArchiveConfig;
use crate::io::container::ArchiveReader;
use crate::io::export::ExportService;
use crate::io::import::{CollisionPolicy, ImportOptions, ImportService};
use crate::models::ArchiveDocument;
use crate::storage::DirectoryFileStore;
use crate::{Error, Result};
use std::fs;
use std::io::BufReader;
use std::path::Path;

/// How many skipped items are listed before eliding the rest.
const SUMMARY_LIMIT: usize = 10;

/// Executes the export command.
pub fn cmd_export(
    config: &ArchiveConfig,
    data: &Path,
    output: &Path,
    files: Option<&Path>,
) -> Result<()> {
    let document = read_dataset_document(data)?;

    let importer = ImportService::standard();
    let (dataset, skipped) = importer.materialize(&document, &ImportOptions::default())?;

    let files_root = files.unwrap_or(&config.files_root);
    let store = DirectoryFileStore::new(files_root)?;

    let mut sink =
        fs::File::create(output).map_err(|e| Error::operation("create_archive", e))?;
    let report = ExportService::standard().export(&dataset, &store, &mut sink)?;

    println!("Export completed:");
    println!("  Sections:       {}", report.sections);
    println!("  Records:        {}", report.records);
    println!("  Attached files: {}", report.attached_files);
    println!("  Output:         {}", output.display());

    print_list("Skipped dataset records", &skipped);
    print_list("Dropped attachments", &report.dropped_attachments);
    Ok(())
}

/// Executes the import command.
pub fn cmd_import(
    config: &ArchiveConfig,
    archive: &Path,
    data: &Path,
    files: Option<&Path>,
    overwrite: bool,
    strict: &[String],
) -> Result<()> {
    let files_root = files.unwrap_or(&config.files_root);
    let store = DirectoryFileStore::new(files_root)?;

    let mut options = ImportOptions::default().with_collision(if overwrite {
        CollisionPolicy::Overwrite
    } else {
        config.collision
    });
    for section in config.strict_sections.iter().chain(strict) {
        options = options.with_strict_section(section.clone());
    }

    let reader = fs::File::open(archive).map_err(|e| Error::operation("open_archive", e))?;
    let (dataset, report) = ImportService::standard().import(reader, &store, &options)?;

    // Write the rebuilt dataset back out as a canonical, ordered document.
    let document = ExportService::standard().build_document(&dataset)?;
    write_dataset_document(data, &document)?;

    println!("Import completed:");
    println!("  Sections:       {}", report.sections);
    println!("  Records:        {}", report.records);
    println!("  Restored files: {}", report.restored_files.len());
    println!("  Dataset:        {}", data.display());

    print_list("Skipped files", &report.skipped_files);
    print_list("Skipped records", &report.skipped_records);
    Ok(())
}

/// Executes the inspect command.
pub fn cmd_inspect(archive: &Path) -> Result<()> {
    let file = fs::File::open(archive).map_err(|e| Error::operation("open_archive", e))?;
    let mut reader = ArchiveReader::new(file)?;
    let document = reader.document()?;

    println!("Sections:");
    for (name, records) in document.iter() {
        println!("  {name:<24} {} records", records.len());
    }

    let entries = reader.file_entries();
    println!();
    println!("Attached files ({}):", entries.len());
    for entry in &entries {
        println!("  {entry}");
    }
    Ok(())
}

/// Reads a dataset document from a JSON file.
fn read_dataset_document(path: &Path) -> Result<ArchiveDocument> {
    let file = fs::File::open(path).map_err(|e| Error::operation("open_dataset", e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::InvalidInput(format!("invalid dataset file: {e}")))
}

/// Writes a dataset document to a JSON file.
fn write_dataset_document(path: &Path, document: &ArchiveDocument) -> Result<()> {
    let json = serde_json::to_vec_pretty(document)
        .map_err(|e| Error::operation("encode_dataset", e))?;
    fs::write(path, json).map_err(|e| Error::operation("write_dataset", e))
}

/// Prints a truncated list of skipped items.
fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!();
    println!("{label} ({}):", items.len());
    for item in items.iter().take(SUMMARY_LIMIT) {
        println!("  - {item}");
    }
    if items.len() > SUMMARY_LIMIT {
        println!("  ... and {} more", items.len() - SUMMARY_LIMIT);
    }
}
