//! Standard ordering chains for the dataset entities.
//!
//! One chain per entity kind, used by list views and by the export pipeline
//! so that section records always appear in the same order. The per-field
//! directions and null policies live here as configuration; the engine in
//! the parent module knows nothing about any particular field.

use super::{Direction, NullPolicy, OrderingChain};
use crate::models::{Journal, Organization, Person, Project, Publication, TeachingActivity};

/// Persons: last name, first name, id. Names compare case-insensitively.
#[must_use]
pub fn persons() -> OrderingChain<Person> {
    OrderingChain::new(|person: &Person| person.id)
        .key(
            "lastName",
            |person: &Person| person.last_name.to_lowercase(),
            Direction::Ascending,
        )
        .key(
            "firstName",
            |person: &Person| person.first_name.to_lowercase(),
            Direction::Ascending,
        )
}

/// Organizations: name, id.
#[must_use]
pub fn organizations() -> OrderingChain<Organization> {
    OrderingChain::new(|organization: &Organization| organization.id).key(
        "name",
        |organization: &Organization| organization.name.to_lowercase(),
        Direction::Ascending,
    )
}

/// Journals: name, id.
#[must_use]
pub fn journals() -> OrderingChain<Journal> {
    OrderingChain::new(|journal: &Journal| journal.id).key(
        "name",
        |journal: &Journal| journal.name.to_lowercase(),
        Direction::Ascending,
    )
}

/// Publications: year (most recent first), title, id.
#[must_use]
pub fn publications() -> OrderingChain<Publication> {
    OrderingChain::new(|publication: &Publication| publication.id)
        .key(
            "year",
            |publication: &Publication| publication.year,
            Direction::Descending,
        )
        .key(
            "title",
            |publication: &Publication| publication.title.to_lowercase(),
            Direction::Ascending,
        )
}

/// Teaching activities: person, dates (most recent first, ongoing before
/// dated), level, code, id.
///
/// An activity without an end date is still running and therefore the most
/// recent of its person's activities; the missing-first policy on both date
/// criteria encodes that.
#[must_use]
pub fn teaching_activities() -> OrderingChain<TeachingActivity> {
    OrderingChain::new(|activity: &TeachingActivity| activity.id)
        .key(
            "personId",
            |activity: &TeachingActivity| activity.person_id,
            Direction::Ascending,
        )
        .optional_key(
            "startDate",
            |activity: &TeachingActivity| activity.start_date,
            Direction::Descending,
            NullPolicy::First,
        )
        .optional_key(
            "endDate",
            |activity: &TeachingActivity| activity.end_date,
            Direction::Descending,
            NullPolicy::First,
        )
        .key(
            "level",
            |activity: &TeachingActivity| activity.level,
            Direction::Ascending,
        )
        .key(
            "code",
            |activity: &TeachingActivity| activity.code.clone(),
            Direction::Ascending,
        )
}

/// Projects: start date (most recent first, undated drafts last), title, id.
#[must_use]
pub fn projects() -> OrderingChain<Project> {
    OrderingChain::new(|project: &Project| project.id)
        .optional_key(
            "startDate",
            |project: &Project| project.start_date,
            Direction::Descending,
            NullPolicy::Last,
        )
        .key(
            "title",
            |project: &Project| project.title.to_lowercase(),
            Direction::Ascending,
        )
}
