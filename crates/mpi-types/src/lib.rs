//! Small validated value types shared by the patient index crates.

/// Errors raised when building validated text values.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input was empty or whitespace only.
    #[error("Text cannot be empty")]
    Empty,
}

/// Trimmed text holding at least one non-whitespace character.
///
/// Used for identifier values, identifier-type names, tribe names and void
/// reasons: anywhere a blank string would be meaningless but the content is
/// otherwise free-form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if nothing is left after trimming.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<str> for NonEmptyText {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NonEmptyText {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let text = NonEmptyText::new("  MRN-0042 \n").expect("non-empty");
        assert_eq!(text.as_str(), "MRN-0042");
        assert_eq!(text, "MRN-0042");
    }

    #[test]
    fn rejects_blank_input() {
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new(" \t "), Err(TextError::Empty)));
    }

    #[test]
    fn deserialising_blank_string_fails() {
        let err = serde_json::from_str::<NonEmptyText>("\"   \"").expect_err("blank rejected");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn serialises_as_plain_string() {
        let text = NonEmptyText::new("duplicate").expect("non-empty");
        let json = serde_json::to_string(&text).expect("serialise");
        assert_eq!(json, "\"duplicate\"");
    }
}
