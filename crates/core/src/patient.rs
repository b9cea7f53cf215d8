//! The patient entity.
//!
//! A [`Patient`] is a [`Person`] plus patient-specific state: a surrogate key,
//! an optional tribe, an [`IdentifierSet`], audit fields and the void
//! lifecycle.
//!
//! Identity:
//! - Equality and hashing delegate to the backing person's identity token.
//! - The surrogate key, tribe and identifiers take no part, so a patient can be
//!   deduplicated in a `HashSet` before storage assigns it a key.
//!
//! Void lifecycle:
//! - `voided`, `voided_by`, `date_voided` and `void_reason` are plain state.
//! - Nothing here validates transitions (re-voiding, voiding without a reason
//!   and un-voiding are all allowed). Identifier voiding is independent of
//!   patient voiding.

use crate::constants::UNSAVED_PATIENT_LABEL;
use crate::identifier::{IdentifierTypeId, PatientIdentifier};
use crate::identifier_set::IdentifierSet;
use crate::person::{Person, PersonId};
use crate::reference::{Tribe, UserId};
use crate::PersonUuid;
use chrono::{DateTime, Utc};
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone, Debug, Default)]
pub struct Patient {
    person: Person,
    patient_id: Option<PersonId>,
    tribe: Option<Tribe>,
    identifiers: IdentifierSet,

    creator: Option<UserId>,
    date_created: Option<DateTime<Utc>>,
    changed_by: Option<UserId>,
    date_changed: Option<DateTime<Utc>>,

    voided: bool,
    voided_by: Option<UserId>,
    date_voided: Option<DateTime<Utc>>,
    void_reason: Option<String>,
}

impl Patient {
    /// An empty, unsaved patient backed by a new person identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// A patient layered on an existing person. The patient key is seeded from
    /// the person's key.
    pub fn from_person(person: Person) -> Self {
        Self {
            patient_id: person.person_id(),
            person,
            ..Self::default()
        }
    }

    /// A patient known only by surrogate key. See [`Person::with_id`] for the
    /// identity this mints.
    pub fn with_id(patient_id: PersonId) -> Self {
        Self::from_person(Person::with_id(patient_id))
    }

    // ------------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------------

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn uuid(&self) -> PersonUuid {
        self.person.uuid()
    }

    pub fn patient_id(&self) -> Option<PersonId> {
        self.patient_id
    }

    /// Sets the patient key and keeps the backing person's key in step.
    ///
    /// Intended for the storage layer; application code should not reassign
    /// keys.
    pub fn set_patient_id(&mut self, patient_id: Option<PersonId>) {
        self.person.set_person_id(patient_id);
        self.patient_id = patient_id;
    }

    /// Same as [`set_patient_id`](Self::set_patient_id): the two keys are one
    /// value seen from either side.
    pub fn set_person_id(&mut self, person_id: Option<PersonId>) {
        self.set_patient_id(person_id);
    }

    // ------------------------------------------------------------------------
    // Identifiers
    // ------------------------------------------------------------------------

    pub fn identifiers(&self) -> &IdentifierSet {
        &self.identifiers
    }

    pub fn identifiers_mut(&mut self) -> &mut IdentifierSet {
        &mut self.identifiers
    }

    /// Adds `identifier` unless an equal one is already held, pointing its
    /// owner at this patient. `None` is ignored.
    ///
    /// Returns `true` if the identifier was inserted.
    pub fn add_identifier(&mut self, identifier: impl Into<Option<PatientIdentifier>>) -> bool {
        let owner = self.uuid();
        self.identifiers.add(owner, identifier)
    }

    /// Adds each identifier in order, skipping ones already held. Returns the
    /// number inserted.
    pub fn add_identifiers<I>(&mut self, identifiers: I) -> usize
    where
        I: IntoIterator<Item = PatientIdentifier>,
    {
        let owner = self.uuid();
        self.identifiers.add_all(owner, identifiers)
    }

    /// Removes the identifier equal to `identifier`, if held.
    pub fn remove_identifier(
        &mut self,
        identifier: &PatientIdentifier,
    ) -> Option<PatientIdentifier> {
        self.identifiers.remove(identifier)
    }

    /// Replaces the whole identifier set. Entries go through
    /// [`add_identifier`](Self::add_identifier), so duplicates collapse and
    /// every entry ends up owned by this patient.
    pub fn set_identifiers<I>(&mut self, identifiers: I)
    where
        I: IntoIterator<Item = PatientIdentifier>,
    {
        self.identifiers.clear();
        self.add_identifiers(identifiers);
    }

    /// Any one identifier, ignoring the `preferred` flag.
    pub fn patient_identifier(&self) -> Option<&PatientIdentifier> {
        self.identifiers.preferred()
    }

    pub fn patient_identifier_by_type(
        &self,
        type_id: IdentifierTypeId,
    ) -> Option<&PatientIdentifier> {
        self.identifiers.preferred_by_type(type_id)
    }

    pub fn patient_identifier_by_type_name(
        &self,
        type_name: &str,
    ) -> Option<&PatientIdentifier> {
        self.identifiers.preferred_by_type_name(type_name)
    }

    pub fn active_identifiers(&self) -> Vec<&PatientIdentifier> {
        self.identifiers.active()
    }

    // ------------------------------------------------------------------------
    // Reference data and audit
    // ------------------------------------------------------------------------

    pub fn tribe(&self) -> Option<&Tribe> {
        self.tribe.as_ref()
    }

    pub fn set_tribe(&mut self, tribe: Option<Tribe>) {
        self.tribe = tribe;
    }

    pub fn creator(&self) -> Option<UserId> {
        self.creator
    }

    pub fn set_creator(&mut self, creator: Option<UserId>) {
        self.creator = creator;
    }

    pub fn date_created(&self) -> Option<DateTime<Utc>> {
        self.date_created
    }

    pub fn set_date_created(&mut self, date_created: Option<DateTime<Utc>>) {
        self.date_created = date_created;
    }

    pub fn changed_by(&self) -> Option<UserId> {
        self.changed_by
    }

    pub fn set_changed_by(&mut self, changed_by: Option<UserId>) {
        self.changed_by = changed_by;
    }

    pub fn date_changed(&self) -> Option<DateTime<Utc>> {
        self.date_changed
    }

    pub fn set_date_changed(&mut self, date_changed: Option<DateTime<Utc>>) {
        self.date_changed = date_changed;
    }

    // ------------------------------------------------------------------------
    // Void lifecycle
    // ------------------------------------------------------------------------

    pub fn is_voided(&self) -> bool {
        self.voided
    }

    /// Synonym for [`is_voided`](Self::is_voided).
    pub fn voided(&self) -> bool {
        self.is_voided()
    }

    pub fn set_voided(&mut self, voided: bool) {
        self.voided = voided;
    }

    pub fn voided_by(&self) -> Option<UserId> {
        self.voided_by
    }

    pub fn set_voided_by(&mut self, voided_by: Option<UserId>) {
        self.voided_by = voided_by;
    }

    pub fn date_voided(&self) -> Option<DateTime<Utc>> {
        self.date_voided
    }

    pub fn set_date_voided(&mut self, date_voided: Option<DateTime<Utc>>) {
        self.date_voided = date_voided;
    }

    pub fn void_reason(&self) -> Option<&str> {
        self.void_reason.as_deref()
    }

    pub fn set_void_reason(&mut self, void_reason: Option<String>) {
        self.void_reason = void_reason;
    }

    /// Sets all four void fields at once.
    pub fn void(
        &mut self,
        voided_by: UserId,
        void_reason: Option<String>,
        date_voided: DateTime<Utc>,
    ) {
        tracing::debug!("voiding {} by user {}", self, voided_by);
        self.voided = true;
        self.voided_by = Some(voided_by);
        self.date_voided = Some(date_voided);
        self.void_reason = void_reason;
    }

    /// Clears all four void fields.
    pub fn unvoid(&mut self) {
        tracing::debug!("unvoiding {}", self);
        self.voided = false;
        self.voided_by = None;
        self.date_voided = None;
        self.void_reason = None;
    }
}

impl PartialEq for Patient {
    fn eq(&self, other: &Self) -> bool {
        self.person == other.person
    }
}

impl Eq for Patient {}

impl PartialEq<Person> for Patient {
    fn eq(&self, other: &Person) -> bool {
        self.person == *other
    }
}

impl PartialEq<Patient> for Person {
    fn eq(&self, other: &Patient) -> bool {
        *self == other.person
    }
}

impl Hash for Patient {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.person.hash(state);
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patient_id {
            Some(id) => write!(f, "Patient#{id}"),
            None => write!(f, "Patient#{UNSAVED_PATIENT_LABEL}"),
        }
    }
}
