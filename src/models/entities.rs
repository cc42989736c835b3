//! Entity snapshots and their enums.
//!
//! These are flat, read-only snapshots of the laboratory dataset as seen by
//! the archive pipeline. Every entity carries a permanent numeric `id` that
//! is unique within its kind; the ordering engine relies on it as the final
//! tie-break.

use chrono::NaiveDate;
use std::fmt;

/// A researcher or staff member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Permanent unique identifier.
    pub id: u64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email address.
    pub email: Option<String>,
    /// ORCID identifier.
    pub orcid: Option<String>,
}

/// A research organization or partner institution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    /// Permanent unique identifier.
    pub id: u64,
    /// Usual acronym.
    pub acronym: Option<String>,
    /// Full legal name.
    pub name: String,
    /// ISO country name.
    pub country: Option<String>,
}

/// A scientific journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Journal {
    /// Permanent unique identifier.
    pub id: u64,
    /// Journal name.
    pub name: String,
    /// Publisher name.
    pub publisher: Option<String>,
    /// ISSN number.
    pub issn: Option<String>,
}

/// Kind of a publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicationKind {
    /// Article in a peer-reviewed journal.
    JournalPaper,
    /// Paper in conference proceedings.
    ConferencePaper,
    /// Authored book.
    Book,
    /// Chapter in a collective book.
    BookChapter,
    /// PhD or master thesis.
    Thesis,
    /// Technical or project report.
    TechnicalReport,
}

impl PublicationKind {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JournalPaper => "journal-paper",
            Self::ConferencePaper => "conference-paper",
            Self::Book => "book",
            Self::BookChapter => "book-chapter",
            Self::Thesis => "thesis",
            Self::TechnicalReport => "technical-report",
        }
    }

    /// Parses a kind string.
    ///
    /// Returns `None` if the kind is not recognized.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "journal-paper" => Some(Self::JournalPaper),
            "conference-paper" => Some(Self::ConferencePaper),
            "book" => Some(Self::Book),
            "book-chapter" => Some(Self::BookChapter),
            "thesis" => Some(Self::Thesis),
            "technical-report" => Some(Self::TechnicalReport),
            _ => None,
        }
    }
}

impl fmt::Display for PublicationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scientific publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Permanent unique identifier.
    pub id: u64,
    /// Publication title.
    pub title: String,
    /// Kind of publication.
    pub kind: PublicationKind,
    /// Publication year.
    pub year: i32,
    /// DOI identifier.
    pub doi: Option<String>,
    /// Identifier of the hosting journal, if any.
    pub journal_id: Option<u64>,
    /// Identifiers of the authors, in author order.
    pub author_ids: Vec<u64>,
    /// Precise publication date, if known.
    pub publication_date: Option<NaiveDate>,
    /// Relative path of the downloadable PDF in the file store.
    pub path_to_downloadable_pdf: Option<String>,
    /// Relative path of the downloadable award certificate in the file store.
    pub path_to_downloadable_award_certificate: Option<String>,
}

/// Academic level of a teaching activity.
///
/// The declaration order is the sort order used by the standard
/// teaching-activity chain: doctoral first, high school last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TeachingLevel {
    /// Doctoral degree teaching.
    DoctoralDegree,
    /// Master degree teaching.
    MasterDegree,
    /// Bachelor degree teaching.
    BachelorDegree,
    /// High-school level teaching.
    HighSchoolDegree,
}

impl TeachingLevel {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DoctoralDegree => "doctoral-degree",
            Self::MasterDegree => "master-degree",
            Self::BachelorDegree => "bachelor-degree",
            Self::HighSchoolDegree => "high-school-degree",
        }
    }

    /// Parses a level string.
    ///
    /// Returns `None` if the level is not recognized.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "doctoral-degree" => Some(Self::DoctoralDegree),
            "master-degree" => Some(Self::MasterDegree),
            "bachelor-degree" => Some(Self::BachelorDegree),
            "high-school-degree" => Some(Self::HighSchoolDegree),
            _ => None,
        }
    }
}

impl fmt::Display for TeachingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A teaching activity held by a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeachingActivity {
    /// Permanent unique identifier.
    pub id: u64,
    /// Course code (e.g. "CS101").
    pub code: String,
    /// Course title.
    pub title: String,
    /// Academic level.
    pub level: TeachingLevel,
    /// Identifier of the teaching person.
    pub person_id: u64,
    /// Hosting university, if different from the home institution.
    pub university: Option<String>,
    /// First day of the activity.
    pub start_date: Option<NaiveDate>,
    /// Last day of the activity; absent while the activity is ongoing.
    pub end_date: Option<NaiveDate>,
    /// Yearly teaching hours.
    pub hours_per_year: u64,
}

/// A research project.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// Permanent unique identifier.
    pub id: u64,
    /// Usual acronym.
    pub acronym: Option<String>,
    /// Scientific title.
    pub title: String,
    /// Global budget in kilo-euros.
    pub budget: Option<f64>,
    /// Identifier of the coordinating organization.
    pub coordinator_id: Option<u64>,
    /// First day of the project.
    pub start_date: Option<NaiveDate>,
    /// Last day of the project.
    pub end_date: Option<NaiveDate>,
    /// Relative path of the project logo in the file store.
    pub path_to_logo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_kind_round_trip() {
        for kind in [
            PublicationKind::JournalPaper,
            PublicationKind::ConferencePaper,
            PublicationKind::Book,
            PublicationKind::BookChapter,
            PublicationKind::Thesis,
            PublicationKind::TechnicalReport,
        ] {
            assert_eq!(PublicationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(PublicationKind::parse("poster"), None);
    }

    #[test]
    fn test_teaching_level_order() {
        assert!(TeachingLevel::DoctoralDegree < TeachingLevel::MasterDegree);
        assert!(TeachingLevel::MasterDegree < TeachingLevel::BachelorDegree);
        assert!(TeachingLevel::BachelorDegree < TeachingLevel::HighSchoolDegree);
    }

    #[test]
    fn test_teaching_level_parse_is_case_insensitive() {
        assert_eq!(
            TeachingLevel::parse("Master-Degree"),
            Some(TeachingLevel::MasterDegree)
        );
        assert_eq!(TeachingLevel::parse("postdoc"), None);
    }
}
