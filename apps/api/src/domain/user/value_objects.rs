use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length accepted for a user identity
pub const MAX_USER_ID_LEN: usize = 64;

/// UserId value object identifying a registered user
///
/// # Invariants
/// - Must not be empty
/// - Must not contain whitespace
/// - Must be at most 64 characters long
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId value object
    ///
    /// # Arguments
    /// * `user_id` - The identity string to validate
    ///
    /// # Returns
    /// * `Ok(UserId)` - If the identity is valid
    /// * `Err(String)` - If the identity is invalid
    ///
    /// # Example
    /// ```
    /// use keepnote_api::domain::user::value_objects::UserId;
    ///
    /// let user_id = UserId::new("alice").expect("valid user id");
    /// assert_eq!(user_id.as_str(), "alice");
    /// ```
    pub fn new(user_id: impl Into<String>) -> Result<Self, String> {
        let user_id = user_id.into();
        if Self::is_valid(&user_id) {
            Ok(UserId(user_id))
        } else {
            Err(format!("Invalid user id: {:?}", user_id))
        }
    }

    fn is_valid(user_id: &str) -> bool {
        !user_id.is_empty()
            && user_id.len() <= MAX_USER_ID_LEN
            && !user_id.chars().any(char::is_whitespace)
    }

    /// Returns the identity as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserId::new(value)
    }
}

impl From<UserId> for String {
    fn from(user_id: UserId) -> Self {
        user_id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_user_id() {
        assert!(UserId::new("alice").is_ok());
    }

    #[test]
    fn valid_user_id_with_symbols() {
        assert!(UserId::new("alice.smith@example.com").is_ok());
    }

    #[test]
    fn invalid_user_id_empty() {
        assert!(UserId::new("").is_err());
    }

    #[test]
    fn invalid_user_id_whitespace() {
        assert!(UserId::new("alice smith").is_err());
        assert!(UserId::new(" alice").is_err());
    }

    #[test]
    fn invalid_user_id_too_long() {
        let long = "a".repeat(MAX_USER_ID_LEN + 1);
        assert!(UserId::new(long).is_err());
        assert!(UserId::new("a".repeat(MAX_USER_ID_LEN)).is_ok());
    }

    #[test]
    fn user_id_display() {
        let user_id = UserId::new("alice").unwrap();
        assert_eq!(format!("{}", user_id), "alice");
    }

    #[test]
    fn user_id_deserialize_validates() {
        let ok: Result<UserId, _> = serde_json::from_str("\"bob\"");
        assert_eq!(ok.unwrap().as_str(), "bob");

        let err: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(err.is_err());
    }
}
