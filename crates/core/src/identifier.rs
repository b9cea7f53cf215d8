//! Patient identifiers and their types.
//!
//! Identifier types (MRN, national ID, ...) come from an external catalog and
//! are carried here by key and name only. A [`PatientIdentifier`] is one value
//! of one type attached to one patient.
//!
//! Notes:
//! - Identity of an identifier is its type key plus its value. Flags
//!   (`preferred`, `voided`) and audit fields take no part in equality.
//! - Key fields have no setters. Entries can be edited in place inside an
//!   [`IdentifierSet`](crate::IdentifierSet) without breaking its uniqueness.
//! - Values are kept exactly as given. No trimming and no format rules.

use crate::reference::UserId;
use crate::{NonEmptyText, PatientResult, PersonUuid};
use chrono::{DateTime, Utc};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Catalog key of an identifier type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentifierTypeId(pub i32);

impl fmt::Display for IdentifierTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Catalog entry describing a class of identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PatientIdentifierType {
    id: IdentifierTypeId,
    name: NonEmptyText,
    description: Option<String>,
}

impl PatientIdentifierType {
    pub fn new(id: IdentifierTypeId, name: NonEmptyText) -> Self {
        Self {
            id,
            name,
            description: None,
        }
    }

    /// Builds a type from a raw name.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::Text`](crate::PatientError::Text) if `name` is blank.
    pub fn try_new(id: IdentifierTypeId, name: impl AsRef<str>) -> PatientResult<Self> {
        Ok(Self::new(id, NonEmptyText::new(name)?))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> IdentifierTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn name_text(&self) -> &NonEmptyText {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// One identifier value of a given type.
///
/// The owning patient is recorded as the patient's [`PersonUuid`]. It is set
/// when the identifier is added to a patient and is left untouched when it is
/// removed.
#[derive(Clone, Debug)]
pub struct PatientIdentifier {
    identifier: String,
    identifier_type: PatientIdentifierType,
    preferred: bool,
    voided: bool,
    creator: Option<UserId>,
    date_created: Option<DateTime<Utc>>,
    patient: Option<PersonUuid>,
}

impl PatientIdentifier {
    /// A non-preferred, non-voided identifier with no owner yet.
    pub fn new(identifier: impl Into<String>, identifier_type: PatientIdentifierType) -> Self {
        Self {
            identifier: identifier.into(),
            identifier_type,
            preferred: false,
            voided: false,
            creator: None,
            date_created: None,
            patient: None,
        }
    }

    pub fn with_preferred(mut self, preferred: bool) -> Self {
        self.preferred = preferred;
        self
    }

    pub fn with_voided(mut self, voided: bool) -> Self {
        self.voided = voided;
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn identifier_type(&self) -> &PatientIdentifierType {
        &self.identifier_type
    }

    pub fn is_preferred(&self) -> bool {
        self.preferred
    }

    pub fn set_preferred(&mut self, preferred: bool) {
        self.preferred = preferred;
    }

    pub fn is_voided(&self) -> bool {
        self.voided
    }

    pub fn set_voided(&mut self, voided: bool) {
        self.voided = voided;
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

    /// Identity of the patient this identifier was last added to.
    pub fn patient(&self) -> Option<PersonUuid> {
        self.patient
    }

    pub(crate) fn set_patient(&mut self, patient: PersonUuid) {
        self.patient = Some(patient);
    }
}

impl PartialEq for PatientIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.identifier_type.id == other.identifier_type.id && self.identifier == other.identifier
    }
}

impl Eq for PatientIdentifier {}

impl Hash for PatientIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier_type.id.hash(state);
        self.identifier.hash(state);
    }
}

impl fmt::Display for PatientIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.identifier_type.name, self.identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::tests::hash_of;

    fn mrn() -> PatientIdentifierType {
        PatientIdentifierType::try_new(IdentifierTypeId(1), "MRN").expect("type name")
    }

    #[test]
    fn equality_ignores_flags_and_owner() {
        let mut a = PatientIdentifier::new("1001", mrn());
        let b = PatientIdentifier::new("1001", mrn())
            .with_preferred(true)
            .with_voided(true);
        a.set_patient(PersonUuid::new());

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn same_value_different_type_is_distinct() {
        let national =
            PatientIdentifierType::try_new(IdentifierTypeId(2), "National ID").expect("type name");
        let a = PatientIdentifier::new("1001", mrn());
        let b = PatientIdentifier::new("1001", national);

        assert_ne!(a, b);
    }

    #[test]
    fn type_equality_is_by_key_not_name() {
        let renamed = PatientIdentifierType::try_new(IdentifierTypeId(1), "Medical Record No.")
            .expect("type name");
        let a = PatientIdentifier::new("1001", mrn());
        let b = PatientIdentifier::new("1001", renamed);

        assert_eq!(a, b);
    }

    #[test]
    fn type_try_new_rejects_blank_names() {
        let err = PatientIdentifierType::try_new(IdentifierTypeId(9), "").expect_err("blank name");
        assert!(matches!(err, crate::PatientError::Text(_)));
    }

    #[test]
    fn values_are_kept_verbatim() {
        let padded = PatientIdentifier::new(" 1001", mrn());
        let plain = PatientIdentifier::new("1001", mrn());

        assert_eq!(padded.identifier(), " 1001");
        assert_ne!(padded, plain);
    }

    #[test]
    fn new_identifier_has_defaults() {
        let id = PatientIdentifier::new("1001", mrn());

        assert!(!id.is_preferred());
        assert!(!id.is_voided());
        assert!(id.patient().is_none());
        assert_eq!(id.to_string(), "MRN:1001");
    }
}
