//! In-memory dataset and section identifiers.

use super::entities::{Journal, Organization, Person, Project, Publication, TeachingActivity};
use std::fmt;

/// Identifies one entity collection within the dataset.
///
/// The order of [`SectionKind::all`] is the registration order: it fixes the
/// section order of every exported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Researchers and staff members.
    Persons,
    /// Research organizations.
    Organizations,
    /// Scientific journals.
    Journals,
    /// Scientific publications.
    Publications,
    /// Teaching activities.
    TeachingActivities,
    /// Research projects.
    Projects,
}

impl SectionKind {
    /// Returns every section kind in registration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Persons,
            Self::Organizations,
            Self::Journals,
            Self::Publications,
            Self::TeachingActivities,
            Self::Projects,
        ]
    }

    /// Returns the section name used in archive documents.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Persons => "persons",
            Self::Organizations => "organizations",
            Self::Journals => "journals",
            Self::Publications => "publications",
            Self::TeachingActivities => "teachingActivities",
            Self::Projects => "projects",
        }
    }

    /// Parses a section name.
    ///
    /// Returns `None` if the name is not a known section.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "persons" => Some(Self::Persons),
            "organizations" => Some(Self::Organizations),
            "journals" => Some(Self::Journals),
            "publications" => Some(Self::Publications),
            "teachingActivities" => Some(Self::TeachingActivities),
            "projects" => Some(Self::Projects),
            _ => None,
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The entities of one section, moved as a unit between the dataset and the
/// pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionEntities {
    /// Person snapshots.
    Persons(Vec<Person>),
    /// Organization snapshots.
    Organizations(Vec<Organization>),
    /// Journal snapshots.
    Journals(Vec<Journal>),
    /// Publication snapshots.
    Publications(Vec<Publication>),
    /// Teaching-activity snapshots.
    TeachingActivities(Vec<TeachingActivity>),
    /// Project snapshots.
    Projects(Vec<Project>),
}

impl SectionEntities {
    /// Returns the kind of this section.
    #[must_use]
    pub const fn kind(&self) -> SectionKind {
        match self {
            Self::Persons(_) => SectionKind::Persons,
            Self::Organizations(_) => SectionKind::Organizations,
            Self::Journals(_) => SectionKind::Journals,
            Self::Publications(_) => SectionKind::Publications,
            Self::TeachingActivities(_) => SectionKind::TeachingActivities,
            Self::Projects(_) => SectionKind::Projects,
        }
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Persons(items) => items.len(),
            Self::Organizations(items) => items.len(),
            Self::Journals(items) => items.len(),
            Self::Publications(items) => items.len(),
            Self::TeachingActivities(items) => items.len(),
            Self::Projects(items) => items.len(),
        }
    }

    /// Returns whether the section has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The full in-memory dataset, one collection per entity kind.
///
/// A dataset is the unit of export and the product of import. It is a plain
/// value: cloning it yields the consistent snapshot that one export
/// invocation works on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Researchers and staff members.
    pub persons: Vec<Person>,
    /// Research organizations.
    pub organizations: Vec<Organization>,
    /// Scientific journals.
    pub journals: Vec<Journal>,
    /// Scientific publications.
    pub publications: Vec<Publication>,
    /// Teaching activities.
    pub teaching_activities: Vec<TeachingActivity>,
    /// Research projects.
    pub projects: Vec<Project>,
}

impl Dataset {
    /// Creates an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entities across all sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.persons.len()
            + self.organizations.len()
            + self.journals.len()
            + self.publications.len()
            + self.teaching_activities.len()
            + self.projects.len()
    }

    /// Returns whether the dataset has no entities at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces one section's entities wholesale.
    pub fn replace_section(&mut self, entities: SectionEntities) {
        match entities {
            SectionEntities::Persons(items) => self.persons = items,
            SectionEntities::Organizations(items) => self.organizations = items,
            SectionEntities::Journals(items) => self.journals = items,
            SectionEntities::Publications(items) => self.publications = items,
            SectionEntities::TeachingActivities(items) => self.teaching_activities = items,
            SectionEntities::Projects(items) => self.projects = items,
        }
    }
}
