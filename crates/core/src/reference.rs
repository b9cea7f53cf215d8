//! Reference data a patient points at but does not manage.
//!
//! Users (creators, voiders) and tribes live in their own catalogs. The patient
//! keeps only what is needed to round-trip the reference through storage.

use crate::NonEmptyText;
use std::fmt;

/// Surrogate key of a system user recorded in audit and void fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub i32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tribe reference-data entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tribe {
    pub tribe_id: i32,
    pub name: NonEmptyText,
    pub retired: bool,
}

impl Tribe {
    pub fn new(tribe_id: i32, name: NonEmptyText) -> Self {
        Self {
            tribe_id,
            name,
            retired: false,
        }
    }
}
