//! Per-section codecs between entities and records.
//!
//! Each entity kind has an explicit codec: a pair of pure functions mapping
//! an entity to a [`Record`] and back. The field mapping is spelled out
//! rather than derived, so the archive schema is a deliberate, stable
//! surface: unknown record fields are ignored on decode, and optional entity
//! fields that are absent are never written.
//!
//! [`CodecRegistry`] binds every section to its codec and its ordering
//! chain; it is the single place the pipeline dispatches through.

use crate::models::{
    FieldError, Journal, Organization, Person, Project, Publication, PublicationKind, Record,
    SectionEntities, SectionKind, TeachingActivity, TeachingLevel,
};
use crate::ordering::{OrderingChain, chains};

/// A reversible mapping between one entity kind and its record shape.
pub trait SectionCodec {
    /// The entity kind this codec handles.
    type Entity;

    /// Converts an entity snapshot into a record.
    fn to_record(&self, entity: &Self::Entity) -> Record;

    /// Reconstructs an entity from a record.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] when a required field is absent or a field
    /// value is mistyped or invalid. Unknown fields are ignored.
    fn from_record(&self, record: &Record) -> Result<Self::Entity, FieldError>;
}

/// Codec for [`Person`] records.
pub struct PersonCodec;

impl SectionCodec for PersonCodec {
    type Entity = Person;

    fn to_record(&self, person: &Person) -> Record {
        let mut record = Record::new();
        record.set("id", person.id);
        record.set("firstName", person.first_name.as_str());
        record.set("lastName", person.last_name.as_str());
        record.set_opt("email", person.email.as_deref());
        record.set_opt("orcid", person.orcid.as_deref());
        record
    }

    fn from_record(&self, record: &Record) -> Result<Person, FieldError> {
        Ok(Person {
            id: record.require_u64("id")?,
            first_name: record.require_str("firstName")?.to_string(),
            last_name: record.require_str("lastName")?.to_string(),
            email: record.opt_str("email")?.map(str::to_string),
            orcid: record.opt_str("orcid")?.map(str::to_string),
        })
    }
}

/// Codec for [`Organization`] records.
pub struct OrganizationCodec;

impl SectionCodec for OrganizationCodec {
    type Entity = Organization;

    fn to_record(&self, organization: &Organization) -> Record {
        let mut record = Record::new();
        record.set("id", organization.id);
        record.set_opt("acronym", organization.acronym.as_deref());
        record.set("name", organization.name.as_str());
        record.set_opt("country", organization.country.as_deref());
        record
    }

    fn from_record(&self, record: &Record) -> Result<Organization, FieldError> {
        Ok(Organization {
            id: record.require_u64("id")?,
            acronym: record.opt_str("acronym")?.map(str::to_string),
            name: record.require_str("name")?.to_string(),
            country: record.opt_str("country")?.map(str::to_string),
        })
    }
}

/// Codec for [`Journal`] records.
pub struct JournalCodec;

impl SectionCodec for JournalCodec {
    type Entity = Journal;

    fn to_record(&self, journal: &Journal) -> Record {
        let mut record = Record::new();
        record.set("id", journal.id);
        record.set("name", journal.name.as_str());
        record.set_opt("publisher", journal.publisher.as_deref());
        record.set_opt("issn", journal.issn.as_deref());
        record
    }

    fn from_record(&self, record: &Record) -> Result<Journal, FieldError> {
        Ok(Journal {
            id: record.require_u64("id")?,
            name: record.require_str("name")?.to_string(),
            publisher: record.opt_str("publisher")?.map(str::to_string),
            issn: record.opt_str("issn")?.map(str::to_string),
        })
    }
}

/// Codec for [`Publication`] records.
pub struct PublicationCodec;

impl SectionCodec for PublicationCodec {
    type Entity = Publication;

    fn to_record(&self, publication: &Publication) -> Record {
        let mut record = Record::new();
        record.set("id", publication.id);
        record.set("title", publication.title.as_str());
        record.set("type", publication.kind.as_str());
        record.set("year", publication.year);
        record.set_opt("doi", publication.doi.as_deref());
        record.set_opt("journalId", publication.journal_id);
        record.set(
            "authorIds",
            serde_json::Value::from(publication.author_ids.clone()),
        );
        record.set_opt(
            "publicationDate",
            publication.publication_date.map(|date| date.to_string()),
        );
        record.set_opt(
            "pathToDownloadablePDF",
            publication.path_to_downloadable_pdf.as_deref(),
        );
        record.set_opt(
            "pathToDownloadableAwardCertificate",
            publication.path_to_downloadable_award_certificate.as_deref(),
        );
        record
    }

    fn from_record(&self, record: &Record) -> Result<Publication, FieldError> {
        let raw_kind = record.require_str("type")?;
        let kind = PublicationKind::parse(raw_kind)
            .ok_or_else(|| FieldError::invalid("type", "publication type", raw_kind))?;
        Ok(Publication {
            id: record.require_u64("id")?,
            title: record.require_str("title")?.to_string(),
            kind,
            year: record.require_i32("year")?,
            doi: record.opt_str("doi")?.map(str::to_string),
            journal_id: record.opt_u64("journalId")?,
            author_ids: record.u64_array("authorIds")?,
            publication_date: record.opt_date("publicationDate")?,
            path_to_downloadable_pdf: record
                .opt_str("pathToDownloadablePDF")?
                .map(str::to_string),
            path_to_downloadable_award_certificate: record
                .opt_str("pathToDownloadableAwardCertificate")?
                .map(str::to_string),
        })
    }
}

/// Codec for [`TeachingActivity`] records.
pub struct TeachingActivityCodec;

impl SectionCodec for TeachingActivityCodec {
    type Entity = TeachingActivity;

    fn to_record(&self, activity: &TeachingActivity) -> Record {
        let mut record = Record::new();
        record.set("id", activity.id);
        record.set("code", activity.code.as_str());
        record.set("title", activity.title.as_str());
        record.set("level", activity.level.as_str());
        record.set("personId", activity.person_id);
        record.set_opt("university", activity.university.as_deref());
        record.set_opt("startDate", activity.start_date.map(|date| date.to_string()));
        record.set_opt("endDate", activity.end_date.map(|date| date.to_string()));
        record.set("hoursPerYear", activity.hours_per_year);
        record
    }

    fn from_record(&self, record: &Record) -> Result<TeachingActivity, FieldError> {
        let raw_level = record.require_str("level")?;
        let level = TeachingLevel::parse(raw_level)
            .ok_or_else(|| FieldError::invalid("level", "teaching level", raw_level))?;
        Ok(TeachingActivity {
            id: record.require_u64("id")?,
            code: record.require_str("code")?.to_string(),
            title: record.require_str("title")?.to_string(),
            level,
            person_id: record.require_u64("personId")?,
            university: record.opt_str("university")?.map(str::to_string),
            start_date: record.opt_date("startDate")?,
            end_date: record.opt_date("endDate")?,
            hours_per_year: record.require_u64("hoursPerYear")?,
        })
    }
}

/// Codec for [`Project`] records.
pub struct ProjectCodec;

impl SectionCodec for ProjectCodec {
    type Entity = Project;

    fn to_record(&self, project: &Project) -> Record {
        let mut record = Record::new();
        record.set("id", project.id);
        record.set_opt("acronym", project.acronym.as_deref());
        record.set("title", project.title.as_str());
        record.set_opt("budget", project.budget);
        record.set_opt("coordinatorId", project.coordinator_id);
        record.set_opt("startDate", project.start_date.map(|date| date.to_string()));
        record.set_opt("endDate", project.end_date.map(|date| date.to_string()));
        record.set_opt("pathToLogo", project.path_to_logo.as_deref());
        record
    }

    fn from_record(&self, record: &Record) -> Result<Project, FieldError> {
        Ok(Project {
            id: record.require_u64("id")?,
            acronym: record.opt_str("acronym")?.map(str::to_string),
            title: record.require_str("title")?.to_string(),
            budget: record.opt_f64("budget")?,
            coordinator_id: record.opt_u64("coordinatorId")?,
            start_date: record.opt_date("startDate")?,
            end_date: record.opt_date("endDate")?,
            path_to_logo: record.opt_str("pathToLogo")?.map(str::to_string),
        })
    }
}

/// Sorts entities with the section's chain (when one is configured) and
/// encodes them in that order.
fn encode<C: SectionCodec>(
    codec: &C,
    chain: Option<&OrderingChain<C::Entity>>,
    mut items: Vec<C::Entity>,
) -> Vec<Record> {
    if let Some(chain) = chain {
        chain.sort(&mut items);
    }
    items.iter().map(|entity| codec.to_record(entity)).collect()
}

/// Decodes records one by one, collecting per-record failures by index.
fn decode<C: SectionCodec>(
    codec: &C,
    records: &[Record],
) -> (Vec<C::Entity>, Vec<(usize, FieldError)>) {
    let mut entities = Vec::with_capacity(records.len());
    let mut failures = Vec::new();
    for (index, record) in records.iter().enumerate() {
        match codec.from_record(record) {
            Ok(entity) => entities.push(entity),
            Err(error) => failures.push((index, error)),
        }
    }
    (entities, failures)
}

/// Binds every section to its codec and its ordering chain.
///
/// The registry is assembled once and reused; a section with no chain keeps
/// the provider's persistence order.
pub struct CodecRegistry {
    person_chain: Option<OrderingChain<Person>>,
    organization_chain: Option<OrderingChain<Organization>>,
    journal_chain: Option<OrderingChain<Journal>>,
    publication_chain: Option<OrderingChain<Publication>>,
    teaching_chain: Option<OrderingChain<TeachingActivity>>,
    project_chain: Option<OrderingChain<Project>>,
}

impl CodecRegistry {
    /// Creates the registry with the standard ordering chains.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            person_chain: Some(chains::persons()),
            organization_chain: Some(chains::organizations()),
            journal_chain: Some(chains::journals()),
            publication_chain: Some(chains::publications()),
            teaching_chain: Some(chains::teaching_activities()),
            project_chain: Some(chains::projects()),
        }
    }

    /// Creates a registry with no chains: sections keep persistence order.
    #[must_use]
    pub fn unordered() -> Self {
        Self {
            person_chain: None,
            organization_chain: None,
            journal_chain: None,
            publication_chain: None,
            teaching_chain: None,
            project_chain: None,
        }
    }

    /// Encodes one section's entities into records, in chain order.
    #[must_use]
    pub fn encode_section(&self, entities: SectionEntities) -> Vec<Record> {
        match entities {
            SectionEntities::Persons(items) => {
                encode(&PersonCodec, self.person_chain.as_ref(), items)
            },
            SectionEntities::Organizations(items) => {
                encode(&OrganizationCodec, self.organization_chain.as_ref(), items)
            },
            SectionEntities::Journals(items) => {
                encode(&JournalCodec, self.journal_chain.as_ref(), items)
            },
            SectionEntities::Publications(items) => {
                encode(&PublicationCodec, self.publication_chain.as_ref(), items)
            },
            SectionEntities::TeachingActivities(items) => {
                encode(&TeachingActivityCodec, self.teaching_chain.as_ref(), items)
            },
            SectionEntities::Projects(items) => {
                encode(&ProjectCodec, self.project_chain.as_ref(), items)
            },
        }
    }

    /// Decodes one section's records, reporting per-record failures.
    #[must_use]
    pub fn decode_section(
        &self,
        kind: SectionKind,
        records: &[Record],
    ) -> (SectionEntities, Vec<(usize, FieldError)>) {
        match kind {
            SectionKind::Persons => {
                let (items, failures) = decode(&PersonCodec, records);
                (SectionEntities::Persons(items), failures)
            },
            SectionKind::Organizations => {
                let (items, failures) = decode(&OrganizationCodec, records);
                (SectionEntities::Organizations(items), failures)
            },
            SectionKind::Journals => {
                let (items, failures) = decode(&JournalCodec, records);
                (SectionEntities::Journals(items), failures)
            },
            SectionKind::Publications => {
                let (items, failures) = decode(&PublicationCodec, records);
                (SectionEntities::Publications(items), failures)
            },
            SectionKind::TeachingActivities => {
                let (items, failures) = decode(&TeachingActivityCodec, records);
                (SectionEntities::TeachingActivities(items), failures)
            },
            SectionKind::Projects => {
                let (items, failures) = decode(&ProjectCodec, records);
                (SectionEntities::Projects(items), failures)
            },
        }
    }
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_publication_codec_omits_absent_optionals() {
        let publication = Publication {
            id: 4,
            title: "On the archive".to_string(),
            kind: PublicationKind::JournalPaper,
            year: 2023,
            doi: None,
            journal_id: Some(9),
            author_ids: vec![1, 2],
            publication_date: NaiveDate::from_ymd_opt(2023, 5, 17),
            path_to_downloadable_pdf: None,
            path_to_downloadable_award_certificate: None,
        };

        let record = PublicationCodec.to_record(&publication);
        assert!(!record.contains("doi"));
        assert!(!record.contains("pathToDownloadablePDF"));
        assert_eq!(record.require_str("type").unwrap(), "journal-paper");

        let decoded = PublicationCodec.from_record(&record).unwrap();
        assert_eq!(decoded, publication);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut record = Record::new();
        record.set("id", 1_u64);
        record.set("firstName", "Rosalind");
        record.set("lastName", "Franklin");
        record.set("legacyHandle", "rf-1958");

        let person = PersonCodec.from_record(&record).unwrap();
        assert_eq!(person.last_name, "Franklin");
    }

    #[test]
    fn test_missing_required_field_fails_the_record() {
        let mut record = Record::new();
        record.set("id", 3_u64);
        record.set("title", "Untitled course");

        let error = TeachingActivityCodec.from_record(&record).unwrap_err();
        assert_eq!(error, FieldError::missing("code"));
    }

    #[test]
    fn test_unknown_publication_kind_fails_the_record() {
        let mut record = Record::new();
        record.set("id", 3_u64);
        record.set("title", "Poster session");
        record.set("type", "poster");
        record.set("year", 2020);

        let error = PublicationCodec.from_record(&record).unwrap_err();
        assert_eq!(
            error,
            FieldError::invalid("type", "publication type", "poster")
        );
    }

    #[test]
    fn test_registry_encodes_in_chain_order() {
        let person = |id, last: &str| Person {
            id,
            first_name: "A".to_string(),
            last_name: last.to_string(),
            email: None,
            orcid: None,
        };
        let items = vec![person(1, "Zuse"), person(2, "Ada")];

        let ordered = CodecRegistry::standard()
            .encode_section(SectionEntities::Persons(items.clone()));
        assert_eq!(ordered[0].require_str("lastName").unwrap(), "Ada");

        let unordered = CodecRegistry::unordered().encode_section(SectionEntities::Persons(items));
        assert_eq!(unordered[0].require_str("lastName").unwrap(), "Zuse");
    }
}
