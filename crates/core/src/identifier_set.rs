//! The identifiers attached to one patient.
//!
//! Entries are unique by [`PatientIdentifier`] equality (type key + value) and
//! iterate in insertion order. Insertion order is what the "last match" fallback
//! of [`IdentifierSet::preferred_by_type`] resolves against, so that lookup is
//! deterministic: among non-preferred matches, the most recently added wins.
//!
//! Adding goes through [`Patient`](crate::Patient), which knows the owner
//! identity to stamp on each entry.

use crate::identifier::{IdentifierTypeId, PatientIdentifier};
use crate::PersonUuid;

#[derive(Clone, Debug, Default)]
pub struct IdentifierSet {
    entries: Vec<PatientIdentifier>,
}

impl IdentifierSet {
    /// Stamps `owner` on the identifier and inserts it unless an equal entry is
    /// already present. `None` is ignored.
    ///
    /// Returns `true` if the set grew.
    pub(crate) fn add(
        &mut self,
        owner: PersonUuid,
        identifier: impl Into<Option<PatientIdentifier>>,
    ) -> bool {
        let Some(mut identifier) = identifier.into() else {
            return false;
        };

        identifier.set_patient(owner);
        if let Some(index) = self.entries.iter().position(|entry| *entry == identifier) {
            tracing::debug!(
                "identifier of type {} already present at position {}, skipping",
                identifier.identifier_type().id(),
                index
            );
            return false;
        }

        self.entries.push(identifier);
        true
    }

    /// [`add`](Self::add) for each element, in order. Returns how many were
    /// inserted.
    pub(crate) fn add_all<I>(&mut self, owner: PersonUuid, identifiers: I) -> usize
    where
        I: IntoIterator<Item = PatientIdentifier>,
    {
        identifiers
            .into_iter()
            .map(|identifier| self.add(owner, identifier))
            .filter(|inserted| *inserted)
            .count()
    }

    /// Removes and returns the entry equal to `identifier`. The removed entry
    /// keeps its owner stamp.
    pub fn remove(&mut self, identifier: &PatientIdentifier) -> Option<PatientIdentifier> {
        let index = self.entries.iter().position(|entry| entry == identifier)?;
        let removed = self.entries.remove(index);
        tracing::debug!(
            "removed identifier of type {} at position {}",
            removed.identifier_type().id(),
            index
        );
        Some(removed)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// A representative identifier: the first entry, regardless of flags.
    ///
    /// Use [`preferred_by_type`](Self::preferred_by_type) or
    /// [`preferred_by_type_name`](Self::preferred_by_type_name) when the
    /// `preferred` flag matters.
    pub fn preferred(&self) -> Option<&PatientIdentifier> {
        self.entries.first()
    }

    /// The identifier of type `type_id` flagged preferred, or failing that the
    /// last entry of that type.
    pub fn preferred_by_type(&self, type_id: IdentifierTypeId) -> Option<&PatientIdentifier> {
        self.preferred_matching(|entry| entry.identifier_type().id() == type_id)
    }

    /// As [`preferred_by_type`](Self::preferred_by_type), matching on the
    /// identifier-type name (exact, case-sensitive).
    pub fn preferred_by_type_name(&self, type_name: &str) -> Option<&PatientIdentifier> {
        self.preferred_matching(|entry| entry.identifier_type().name() == type_name)
    }

    fn preferred_matching<F>(&self, matches: F) -> Option<&PatientIdentifier>
    where
        F: Fn(&PatientIdentifier) -> bool,
    {
        let mut found = None;
        for entry in self.entries.iter().filter(|entry| matches(entry)) {
            if entry.is_preferred() {
                return Some(entry);
            }
            found = Some(entry);
        }
        found
    }

    /// Non-voided entries in iteration order. Empty, never absent.
    pub fn active(&self) -> Vec<&PatientIdentifier> {
        self.entries.iter().filter(|entry| !entry.is_voided()).collect()
    }

    pub fn contains(&self, identifier: &PatientIdentifier) -> bool {
        self.entries.contains(identifier)
    }

    /// Mutable access to the entry equal to `identifier`, for flag and audit
    /// edits.
    pub fn get_mut(&mut self, identifier: &PatientIdentifier) -> Option<&mut PatientIdentifier> {
        self.entries.iter_mut().find(|entry| *entry == identifier)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatientIdentifier> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a IdentifierSet {
    type Item = &'a PatientIdentifier;
    type IntoIter = std::slice::Iter<'a, PatientIdentifier>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
