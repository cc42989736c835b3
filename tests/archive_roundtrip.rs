//! End-to-end round-trip tests over the archive pipelines.
//!
//! Export a dataset with attached files into a container, import it into a
//! fresh file store, and check that entities and files come back intact,
//! that unresolvable references are dropped (not fatal), and that empty
//! sections survive the trip.

use labarchive::io::container::ArchiveReader;
use labarchive::io::export::ExportService;
use labarchive::io::import::{CollisionPolicy, ImportOptions, ImportService};
use labarchive::models::{
    Dataset, Journal, Person, Publication, PublicationKind, TeachingActivity, TeachingLevel,
};
use labarchive::storage::DirectoryFileStore;
use labarchive::FileStore;
use chrono::NaiveDate;
use std::io::Cursor;
use tempfile::TempDir;

const PDF_BYTES: &[u8] = b"%PDF-1.4 sample";
const LOGO_BYTES: &[u8] = b"\x89PNG sample";

fn person(id: u64, first: &str, last: &str) -> Person {
    Person {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: Some(format!("{}@lab.example", first.to_lowercase())),
        orcid: None,
    }
}

fn activity(id: u64, code: &str) -> TeachingActivity {
    TeachingActivity {
        id,
        code: code.to_string(),
        title: format!("Course {code}"),
        level: TeachingLevel::MasterDegree,
        person_id: 1,
        university: None,
        start_date: NaiveDate::from_ymd_opt(2022, 9, 1),
        end_date: NaiveDate::from_ymd_opt(2023, 6, 30),
        hours_per_year: 36,
    }
}

/// A dataset whose collections are already in chain order, so the imported
/// dataset can be compared to it directly.
fn sample_dataset() -> Dataset {
    let mut dataset = Dataset::new();
    dataset.persons = vec![person(2, "Marie", "Curie"), person(1, "Lise", "Meitner")];
    dataset.journals = vec![Journal {
        id: 5,
        name: "Nature".to_string(),
        publisher: Some("Springer".to_string()),
        issn: Some("0028-0836".to_string()),
    }];
    dataset.publications = vec![Publication {
        id: 11,
        title: "Radioactive decay revisited".to_string(),
        kind: PublicationKind::JournalPaper,
        year: 2024,
        doi: Some("10.1000/xyz".to_string()),
        journal_id: Some(5),
        author_ids: vec![1, 2],
        publication_date: NaiveDate::from_ymd_opt(2024, 3, 14),
        path_to_downloadable_pdf: Some("pdfs/decay.pdf".to_string()),
        path_to_downloadable_award_certificate: Some("certs/decay-award.pdf".to_string()),
    }];
    dataset.teaching_activities = vec![activity(10, "C1"), activity(11, "C2")];
    // organizations and projects stay empty on purpose
    dataset
}

#[test]
fn round_trip_preserves_entities_and_files() {
    let source_dir = TempDir::new().unwrap();
    let source_store = DirectoryFileStore::new(source_dir.path()).unwrap();
    source_store.write("pdfs/decay.pdf", PDF_BYTES).unwrap();
    source_store
        .write("certs/decay-award.pdf", LOGO_BYTES)
        .unwrap();

    let dataset = sample_dataset();
    let mut sink = Cursor::new(Vec::new());
    let report = ExportService::standard()
        .export(&dataset, &source_store, &mut sink)
        .unwrap();
    assert_eq!(report.attached_files, 2);
    assert!(report.dropped_attachments.is_empty());

    let target_dir = TempDir::new().unwrap();
    let target_store = DirectoryFileStore::new(target_dir.path()).unwrap();
    sink.set_position(0);
    let (imported, import_report) = ImportService::standard()
        .import(sink, &target_store, &ImportOptions::default())
        .unwrap();

    assert_eq!(imported, dataset);
    assert_eq!(import_report.restored_files.len(), 2);
    assert!(!import_report.has_skips());
    assert_eq!(
        target_store.resolve("pdfs/decay.pdf").unwrap().unwrap(),
        PDF_BYTES
    );
    assert_eq!(
        target_store
            .resolve("certs/decay-award.pdf")
            .unwrap()
            .unwrap(),
        LOGO_BYTES
    );
}

#[test]
fn unresolvable_reference_is_dropped_but_the_rest_survives() {
    let source_dir = TempDir::new().unwrap();
    let source_store = DirectoryFileStore::new(source_dir.path()).unwrap();
    // Only the PDF exists; the award certificate is deliberately missing.
    source_store.write("pdfs/decay.pdf", PDF_BYTES).unwrap();

    let dataset = sample_dataset();
    let mut sink = Cursor::new(Vec::new());
    let report = ExportService::standard()
        .export(&dataset, &source_store, &mut sink)
        .unwrap();
    assert_eq!(report.attached_files, 1);
    assert_eq!(report.dropped_attachments, vec!["certs/decay-award.pdf"]);

    let target_dir = TempDir::new().unwrap();
    let target_store = DirectoryFileStore::new(target_dir.path()).unwrap();
    sink.set_position(0);
    let (imported, _) = ImportService::standard()
        .import(sink, &target_store, &ImportOptions::default())
        .unwrap();

    let mut expected = dataset;
    expected.publications[0].path_to_downloadable_award_certificate = None;
    assert_eq!(imported, expected);
    assert!(!target_store.contains("certs/decay-award.pdf"));
}

#[test]
fn empty_sections_survive_the_round_trip() {
    let source_dir = TempDir::new().unwrap();
    let source_store = DirectoryFileStore::new(source_dir.path()).unwrap();

    let mut sink = Cursor::new(Vec::new());
    ExportService::standard()
        .export(&Dataset::new(), &source_store, &mut sink)
        .unwrap();

    sink.set_position(0);
    let mut reader = ArchiveReader::new(sink).unwrap();
    let document = reader.document().unwrap();
    assert_eq!(document.section_count(), 6);
    assert_eq!(document.section("organizations"), Some(&[][..]));
    assert_eq!(document.record_count(), 0);
    assert!(reader.file_entries().is_empty());
}

#[test]
fn collision_policy_applies_to_every_entry() {
    let source_dir = TempDir::new().unwrap();
    let source_store = DirectoryFileStore::new(source_dir.path()).unwrap();
    source_store.write("pdfs/decay.pdf", PDF_BYTES).unwrap();
    source_store
        .write("certs/decay-award.pdf", LOGO_BYTES)
        .unwrap();

    let mut sink = Cursor::new(Vec::new());
    ExportService::standard()
        .export(&sample_dataset(), &source_store, &mut sink)
        .unwrap();

    let target_dir = TempDir::new().unwrap();
    let target_store = DirectoryFileStore::new(target_dir.path()).unwrap();
    // Pre-existing files with different content.
    target_store.write("pdfs/decay.pdf", b"old").unwrap();
    target_store.write("certs/decay-award.pdf", b"old").unwrap();

    sink.set_position(0);
    let (_, report) = ImportService::standard()
        .import(
            sink.clone(),
            &target_store,
            &ImportOptions::default().with_collision(CollisionPolicy::Skip),
        )
        .unwrap();
    assert!(report.restored_files.is_empty());
    assert_eq!(report.skipped_files.len(), 2);
    assert_eq!(
        target_store.resolve("pdfs/decay.pdf").unwrap().unwrap(),
        b"old"
    );

    sink.set_position(0);
    let (_, report) = ImportService::standard()
        .import(
            sink,
            &target_store,
            &ImportOptions::default().with_collision(CollisionPolicy::Overwrite),
        )
        .unwrap();
    assert_eq!(report.restored_files.len(), 2);
    assert_eq!(
        target_store.resolve("pdfs/decay.pdf").unwrap().unwrap(),
        PDF_BYTES
    );
}

#[test]
fn truncated_container_is_a_single_fatal_error() {
    let source_dir = TempDir::new().unwrap();
    let source_store = DirectoryFileStore::new(source_dir.path()).unwrap();

    let mut sink = Cursor::new(Vec::new());
    ExportService::standard()
        .export(&Dataset::new(), &source_store, &mut sink)
        .unwrap();

    // Cut the container short: the central directory is gone.
    let bytes = sink.into_inner();
    let truncated = Cursor::new(bytes[..bytes.len() / 2].to_vec());

    let target_dir = TempDir::new().unwrap();
    let target_store = DirectoryFileStore::new(target_dir.path()).unwrap();
    let error = ImportService::standard()
        .import(truncated, &target_store, &ImportOptions::default())
        .unwrap_err();
    assert!(matches!(error, labarchive::Error::MalformedContainer(_)));
}
