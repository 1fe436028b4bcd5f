//! User entity and its projections
//!
//! The full row (`User`) carries the password column and is only returned
//! from create/update, mirroring `RETURNING *`. Everything list- or
//! embed-shaped uses a projection that never includes the password.

use serde::Serialize;

use super::post::PostDetail;
use super::validation::ValidationError;

/// Maximum length for usernames
const MAX_USERNAME_LEN: usize = 64;

/// Validated username
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Create a new username.
    ///
    /// # Rules
    /// - Non-empty
    /// - Max 64 characters
    /// - No whitespace
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "username" });
        }

        if s.len() > MAX_USERNAME_LEN {
            return Err(ValidationError::TooLong {
                field: "username",
                max: MAX_USERNAME_LEN,
            });
        }

        if s.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidFormat {
                field: "username",
                reason: "must not contain whitespace",
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the username as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Full user row, as returned by create and update
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
    pub location: String,
    pub active: bool,
}

/// User projection for listings; the password is never selected
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub location: String,
    pub active: bool,
}

/// User with their authored posts, each fully assembled
#[derive(Debug, Clone, Serialize)]
pub struct UserWithPosts {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub location: String,
    pub active: bool,
    pub posts: Vec<PostDetail>,
}

/// Author projection embedded in assembled posts.
/// Excludes password and the active flag.
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub location: String,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Username,
    pub password: String,
    pub name: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_usernames() {
        assert!(Username::new("alice").is_ok());
        assert!(Username::new("alice_92").is_ok());
        assert!(Username::new("a").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = Username::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn rejects_whitespace() {
        let err = Username::new("alice smith").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn max_length() {
        let name_64 = "a".repeat(64);
        assert!(Username::new(&name_64).is_ok());

        let name_65 = "a".repeat(65);
        let err = Username::new(&name_65).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 64, .. }));
    }
}
