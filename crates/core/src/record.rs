//! YAML record format for patients at the storage boundary.
//!
//! Every persisted attribute of a [`Patient`] round-trips through this format
//! unchanged: identity token, surrogate key, tribe, identifiers, audit fields and
//! void fields.
//!
//! ```yaml
//! resourceType: Patient
//! person: 90a8d1ea318041d9adb070a834d4e0f6
//! patientId: 12
//! identifiers:
//!   - identifier: "100-7"
//!     type:
//!       id: 1
//!       name: MRN
//!     preferred: true
//! voided: false
//! ```
//!
//! Notes:
//! - Parsing is strict: unknown keys and wrong types are rejected with the
//!   path of the failing field.
//! - The identifier owner is implied by the enclosing record. Loaded
//!   identifiers go through [`Patient::add_identifiers`], so a record listing
//!   the same identifier twice loads as one entry.

use crate::constants::PATIENT_RESOURCE_TYPE;
use crate::identifier::{IdentifierTypeId, PatientIdentifier, PatientIdentifierType};
use crate::person::{Person, PersonId};
use crate::reference::{Tribe, UserId};
use crate::{NonEmptyText, Patient, PatientError, PatientResult, PersonUuid};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Patient record operations.
///
/// Zero-sized namespace; all methods are associated functions.
pub struct PatientRecord;

impl PatientRecord {
    /// Parse a patient from record YAML.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::Translation`] if the YAML does not match the
    /// record schema (the message names the failing field path), and
    /// [`PatientError::InvalidInput`] if `resourceType` is not `Patient`.
    pub fn parse(yaml_text: &str) -> PatientResult<Patient> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, PatientWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(PatientError::Translation(format!(
                    "patient record schema mismatch at {path}: {source}"
                )));
            }
        };

        if wire.resource_type != PATIENT_RESOURCE_TYPE {
            return Err(PatientError::InvalidInput(format!(
                "expected resourceType '{PATIENT_RESOURCE_TYPE}', got '{}'",
                wire.resource_type
            )));
        }

        Ok(wire_to_domain(wire))
    }

    /// Render a patient as record YAML.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::YamlSerialization`] if serialisation fails.
    pub fn render(patient: &Patient) -> PatientResult<String> {
        serde_yaml::to_string(&domain_to_wire(patient)).map_err(PatientError::YamlSerialization)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct PatientWire {
    resource_type: String,

    person: PersonUuid,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    patient_id: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    tribe: Option<TribeWire>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    identifiers: Vec<IdentifierWire>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    creator: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    changed_by: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_changed: Option<DateTime<Utc>>,

    #[serde(default)]
    voided: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    voided_by: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_voided: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    void_reason: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct TribeWire {
    id: i32,
    name: NonEmptyText,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    retired: bool,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct IdentifierWire {
    identifier: String,

    #[serde(rename = "type")]
    identifier_type: IdentifierTypeWire,

    #[serde(default)]
    preferred: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    voided: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    creator: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    date_created: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct IdentifierTypeWire {
    id: i32,
    name: NonEmptyText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: PatientWire) -> Patient {
    let mut patient = Patient::from_person(Person::with_uuid(wire.person));
    patient.set_patient_id(wire.patient_id.map(PersonId));
    patient.set_tribe(wire.tribe.map(|t| Tribe {
        tribe_id: t.id,
        name: t.name,
        retired: t.retired,
    }));

    let listed = wire.identifiers.len();
    let inserted = patient.add_identifiers(
        wire.identifiers
            .into_iter()
            .map(identifier_from_wire),
    );
    if inserted < listed {
        tracing::warn!(
            "patient record {} lists {} duplicate identifier(s); keeping the first of each",
            wire.person,
            listed - inserted
        );
    }

    patient.set_creator(wire.creator.map(UserId));
    patient.set_date_created(wire.date_created);
    patient.set_changed_by(wire.changed_by.map(UserId));
    patient.set_date_changed(wire.date_changed);

    patient.set_voided(wire.voided);
    patient.set_voided_by(wire.voided_by.map(UserId));
    patient.set_date_voided(wire.date_voided);
    patient.set_void_reason(wire.void_reason);

    patient
}

fn identifier_from_wire(wire: IdentifierWire) -> PatientIdentifier {
    let mut identifier_type = PatientIdentifierType::new(
        IdentifierTypeId(wire.identifier_type.id),
        wire.identifier_type.name,
    );
    if let Some(description) = wire.identifier_type.description {
        identifier_type = identifier_type.with_description(description);
    }

    let mut identifier = PatientIdentifier::new(wire.identifier, identifier_type)
        .with_preferred(wire.preferred)
        .with_voided(wire.voided);
    identifier.set_creator(wire.creator.map(UserId));
    identifier.set_date_created(wire.date_created);
    identifier
}

fn domain_to_wire(patient: &Patient) -> PatientWire {
    PatientWire {
        resource_type: PATIENT_RESOURCE_TYPE.to_string(),
        person: patient.uuid(),
        patient_id: patient.patient_id().map(|id| id.0),
        tribe: patient.tribe().map(|t| TribeWire {
            id: t.tribe_id,
            name: t.name.clone(),
            retired: t.retired,
        }),
        identifiers: patient.identifiers().iter().map(identifier_to_wire).collect(),
        creator: patient.creator().map(|u| u.0),
        date_created: patient.date_created(),
        changed_by: patient.changed_by().map(|u| u.0),
        date_changed: patient.date_changed(),
        voided: patient.is_voided(),
        voided_by: patient.voided_by().map(|u| u.0),
        date_voided: patient.date_voided(),
        void_reason: patient.void_reason().map(str::to_string),
    }
}

fn identifier_to_wire(identifier: &PatientIdentifier) -> IdentifierWire {
    let identifier_type = identifier.identifier_type();
    IdentifierWire {
        identifier: identifier.identifier().to_string(),
        identifier_type: IdentifierTypeWire {
            id: identifier_type.id().0,
            name: identifier_type.name_text().clone(),
            description: identifier_type.description().map(str::to_string),
        },
        preferred: identifier.is_preferred(),
        voided: identifier.is_voided(),
        creator: identifier.creator().map(|u| u.0),
        date_created: identifier.date_created(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"resourceType: Patient
person: 90a8d1ea318041d9adb070a834d4e0f6
patientId: 12
tribe:
  id: 3
  name: Ashanti
identifiers:
  - identifier: "100-7"
    type:
      id: 1
      name: MRN
      description: Medical record number
  - identifier: "100-8"
    type:
      id: 1
      name: MRN
    preferred: true
  - identifier: GHA-123456789
    type:
      id: 2
      name: National ID
    voided: true
    creator: 4
    dateCreated: 2025-11-02T08:15:00Z
creator: 1
dateCreated: 2025-11-01T10:00:00Z
changedBy: 2
dateChanged: 2026-01-23T13:58:04.099304Z
voided: true
voidedBy: 3
dateVoided: 2026-02-01T00:00:00Z
voidReason: duplicate
"#;

    #[test]
    fn parses_full_record() {
        let patient = PatientRecord::parse(SAMPLE).expect("parse record");

        assert_eq!(patient.uuid().to_string(), "90a8d1ea318041d9adb070a834d4e0f6");
        assert_eq!(patient.patient_id(), Some(PersonId(12)));
        assert_eq!(patient.person().person_id(), Some(PersonId(12)));
        assert_eq!(patient.tribe().map(|t| t.name.as_str()), Some("Ashanti"));
        assert_eq!(patient.identifiers().len(), 3);
        assert!(patient
            .identifiers()
            .iter()
            .all(|e| e.patient() == Some(patient.uuid())));

        let mrn = patient
            .patient_identifier_by_type(IdentifierTypeId(1))
            .expect("mrn");
        assert_eq!(mrn.identifier(), "100-8");

        let active: Vec<&str> = patient
            .active_identifiers()
            .iter()
            .map(|e| e.identifier())
            .collect();
        assert_eq!(active, vec!["100-7", "100-8"]);

        assert!(patient.is_voided());
        assert_eq!(patient.voided_by(), Some(UserId(3)));
        assert_eq!(patient.void_reason(), Some("duplicate"));
        assert_eq!(patient.changed_by(), Some(UserId(2)));
    }

    #[test]
    fn render_then_parse_is_stable() {
        let patient = PatientRecord::parse(SAMPLE).expect("parse record");
        let rendered = PatientRecord::render(&patient).expect("render record");
        let reparsed = PatientRecord::parse(&rendered).expect("reparse record");

        assert_eq!(patient, reparsed);
        assert_eq!(
            rendered,
            PatientRecord::render(&reparsed).expect("render again")
        );
        assert!(rendered.contains("description: Medical record number"));
        assert!(rendered.contains("voidReason: duplicate"));
    }

    #[test]
    fn parses_minimal_record() {
        let input = "resourceType: Patient\nperson: \"00000000000000000000000000000001\"\n";

        let patient = PatientRecord::parse(input).expect("parse minimal record");
        assert!(patient.patient_id().is_none());
        assert!(patient.identifiers().is_empty());
        assert!(patient.tribe().is_none());
        assert!(!patient.is_voided());
    }

    #[test]
    fn renders_minimal_patient_without_optional_keys() {
        let yaml = PatientRecord::render(&Patient::new()).expect("render");

        assert!(yaml.contains("resourceType: Patient"));
        assert!(yaml.contains("person:"));
        assert!(yaml.contains("voided: false"));
        assert!(!yaml.contains("patientId"));
        assert!(!yaml.contains("identifiers"));
        assert!(!yaml.contains("voidReason"));
    }

    #[test]
    fn duplicate_identifiers_collapse_on_load() {
        let input = r#"resourceType: Patient
person: 90a8d1ea318041d9adb070a834d4e0f6
identifiers:
  - identifier: "100-7"
    type: { id: 1, name: MRN }
  - identifier: "100-7"
    type: { id: 1, name: MRN }
    preferred: true
"#;

        let patient = PatientRecord::parse(input).expect("parse record");
        assert_eq!(patient.identifiers().len(), 1);
        assert!(!patient.patient_identifier().expect("held").is_preferred());
    }

    #[test]
    fn rejects_unknown_keys_with_path() {
        let input = r#"resourceType: Patient
person: 90a8d1ea318041d9adb070a834d4e0f6
identifiers:
  - identifier: "100-7"
    type: { id: 1, name: MRN }
    location: Kumasi
"#;

        let err = PatientRecord::parse(input).expect_err("unknown key rejected");
        match err {
            PatientError::Translation(msg) => {
                assert!(msg.contains("identifiers"), "{msg}");
                assert!(msg.contains("location"), "{msg}");
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_in_values_survives_round_trip() {
        let input = r#"resourceType: Patient
person: 90a8d1ea318041d9adb070a834d4e0f6
identifiers:
  - identifier: " 1001"
    type: { id: 1, name: MRN }
  - identifier: "1001"
    type: { id: 1, name: MRN }
  - identifier: ""
    type: { id: 2, name: National ID }
voided: true
voidReason: "duplicate "
"#;

        let patient = PatientRecord::parse(input).expect("parse record");
        let rendered = PatientRecord::render(&patient).expect("render record");
        let reparsed = PatientRecord::parse(&rendered).expect("reparse record");

        for loaded in [&patient, &reparsed] {
            let values: Vec<&str> = loaded
                .identifiers()
                .iter()
                .map(|e| e.identifier())
                .collect();
            assert_eq!(values, vec![" 1001", "1001", ""]);
            assert_eq!(loaded.void_reason(), Some("duplicate "));
        }
    }

    #[test]
    fn keeps_empty_void_reason() {
        let input = r#"resourceType: Patient
person: 90a8d1ea318041d9adb070a834d4e0f6
voided: true
voidReason: ""
"#;

        let patient = PatientRecord::parse(input).expect("parse record");
        assert_eq!(patient.void_reason(), Some(""));

        let rendered = PatientRecord::render(&patient).expect("render record");
        let reparsed = PatientRecord::parse(&rendered).expect("reparse record");
        assert_eq!(reparsed.void_reason(), Some(""));
    }

    #[test]
    fn rejects_blank_identifier_type_name() {
        let input = r#"resourceType: Patient
person: 90a8d1ea318041d9adb070a834d4e0f6
identifiers:
  - identifier: "100-7"
    type: { id: 1, name: "  " }
"#;

        let err = PatientRecord::parse(input).expect_err("blank type name rejected");
        assert!(matches!(err, PatientError::Translation(msg) if msg.contains("identifiers")));
    }

    #[test]
    fn rejects_non_canonical_person_uuid() {
        let input = "resourceType: Patient\nperson: 90A8D1EA-3180-41D9-ADB0-70A834D4E0F6\n";

        let err = PatientRecord::parse(input).expect_err("bad uuid rejected");
        assert!(matches!(err, PatientError::Translation(msg) if msg.contains("person")));
    }

    #[test]
    fn rejects_invalid_resource_type() {
        let input = "resourceType: Person\nperson: 90a8d1ea318041d9adb070a834d4e0f6\n";

        let err = PatientRecord::parse(input).expect_err("wrong resourceType rejected");
        match err {
            PatientError::InvalidInput(msg) => {
                assert!(msg.contains("Patient"));
                assert!(msg.contains("Person"));
            }
            other => panic!("expected InvalidInput error, got {other:?}"),
        }
    }
}
