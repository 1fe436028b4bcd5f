//! Tag entity and tag name validation

use serde::Serialize;

use super::validation::ValidationError;

/// Maximum length for tag names
const MAX_TAG_NAME_LEN: usize = 64;

/// Validated tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagName(String);

impl TagName {
    /// Create a new tag name (non-empty, max 64 characters).
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "tag name" });
        }

        if s.len() > MAX_TAG_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "tag name",
                max: MAX_TAG_NAME_LEN,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the tag name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Tag row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}
