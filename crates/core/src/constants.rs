//! Fixed names used by the patient record format.

/// Value of `resourceType` in every stored patient record.
pub const PATIENT_RESOURCE_TYPE: &str = "Patient";

/// Rendered in place of the surrogate key for patients that were never saved.
pub const UNSAVED_PATIENT_LABEL: &str = "unsaved";
