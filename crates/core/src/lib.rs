//! # MPI Core
//!
//! In-memory model of a patient in a health-record system: the patient's
//! identifier set and the patient's void lifecycle.
//!
//! - [`Patient`] is layered on a [`Person`]. Equality and hashing of a patient
//!   are those of the person's identity token ([`PersonUuid`]), never the
//!   patient's own integer surrogate key, so unsaved patients deduplicate
//!   correctly in hashed containers.
//! - [`IdentifierSet`] holds the patient's [`PatientIdentifier`]s, suppresses
//!   duplicates, and answers "preferred identifier of this type" and "active
//!   identifiers".
//! - [`PatientRecord`] is the YAML record format used at the storage boundary.
//!
//! **No storage or transport concerns**: loading, saving, searching and
//! merging patients belong to the caller. Nothing here is internally
//! synchronised; mutation goes through `&mut self`.

pub mod constants;
pub mod error;
pub mod identifier;
pub mod identifier_set;
pub mod patient;
pub mod person;
pub mod record;
pub mod reference;

pub use error::{PatientError, PatientResult};
pub use identifier::{IdentifierTypeId, PatientIdentifier, PatientIdentifierType};
pub use identifier_set::IdentifierSet;
pub use patient::Patient;
pub use person::{Person, PersonId};
pub use record::PatientRecord;
pub use reference::{Tribe, UserId};

// Re-export the validated primitives used throughout the public API.
pub use mpi_types::NonEmptyText;
pub use mpi_uuid::PersonUuid;
