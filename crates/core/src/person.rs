//! The person a patient is layered on.
//!
//! Only the part of the person model that patient identity depends on lives
//! here: the identity token and the integer surrogate key. Names, addresses and
//! other demographics belong to the wider person model.

use crate::{PatientResult, PersonUuid};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Integer surrogate key assigned by storage. Patients share the key of the
/// person they are layered on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonId(pub i32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Person identity plus its surrogate key.
///
/// Two `Person` values are equal iff their [`PersonUuid`]s are equal. The
/// surrogate key takes no part in equality or hashing, so it can be assigned
/// (or changed) without altering identity.
#[derive(Clone, Debug)]
pub struct Person {
    uuid: PersonUuid,
    person_id: Option<PersonId>,
}

impl Default for Person {
    fn default() -> Self {
        Self::new()
    }
}

impl Person {
    /// A new, unsaved person with a freshly minted identity.
    pub fn new() -> Self {
        Self::with_uuid(PersonUuid::new())
    }

    /// A person with a known identity, typically loaded from storage.
    pub fn with_uuid(uuid: PersonUuid) -> Self {
        Self {
            uuid,
            person_id: None,
        }
    }

    /// A person with an identity given in canonical text form.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::Uuid`](crate::PatientError::Uuid) if `uuid` is
    /// not canonical.
    pub fn parse_uuid(uuid: &str) -> PatientResult<Self> {
        Ok(Self::with_uuid(PersonUuid::parse(uuid)?))
    }

    /// A person known only by surrogate key. A fresh identity is minted, so
    /// two persons built from the same key are distinct until storage supplies
    /// the real identity via [`Person::with_uuid`].
    pub fn with_id(person_id: PersonId) -> Self {
        Self {
            uuid: PersonUuid::new(),
            person_id: Some(person_id),
        }
    }

    pub fn uuid(&self) -> PersonUuid {
        self.uuid
    }

    pub fn person_id(&self) -> Option<PersonId> {
        self.person_id
    }

    pub fn set_person_id(&mut self, person_id: Option<PersonId>) {
        self.person_id = person_id;
    }
}

impl PartialEq for Person {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for Person {}

impl Hash for Person {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}
