use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

pub use ::uuid::Uuid;

/// Canonical identity token of a person.
///
/// Equality and hashing are those of the wrapped UUID. Displays as the
/// 32-character lowercase form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PersonUuid(Uuid);

impl Default for PersonUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonUuid {
    /// Mints a fresh random (v4) token.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a token that must already be in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not exactly 32
    /// lowercase hex characters.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "person UUID must be 32 lowercase hex characters without hyphens, got: '{input}'"
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(format!("invalid person UUID '{input}': {e}")))
    }

    /// Wraps an existing UUID. Any UUID value is acceptable; canonical form
    /// only concerns the text representation.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Purely syntactic check for the canonical text form.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 32
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
    }
}

impl fmt::Display for PersonUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for PersonUuid {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonUuid::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PersonUuid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PersonUuid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PersonUuid::parse(&s).map_err(serde::de::Error::custom)
    }
}
