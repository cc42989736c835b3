//! Data model: archive document tree, entity snapshots, and the dataset.

pub mod dataset;
pub mod document;
pub mod entities;

pub use dataset::{Dataset, SectionEntities, SectionKind};
pub use document::{ArchiveDocument, FieldError, Record};
pub use entities::{
    Journal, Organization, Person, Project, Publication, PublicationKind, TeachingActivity,
    TeachingLevel,
};
