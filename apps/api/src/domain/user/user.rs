use chrono::{DateTime, Utc};

use super::value_objects::UserId;

/// Minimum accepted length for a plaintext password
pub const MIN_PASSWORD_LEN: usize = 8;

/// A registered user
///
/// The credential is only ever held as a bcrypt hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub password_hash: String,
    pub user_mobile: Option<String>,
    pub user_added_date: DateTime<Utc>,
}

/// Checks a plaintext password against the password policy
///
/// # Example
/// ```
/// use keepnote_api::domain::user::validate_password;
///
/// assert!(validate_password("long enough").is_ok());
/// assert!(validate_password("short").is_err());
/// ```
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_policy_boundary() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn password_policy_counts_chars_not_bytes() {
        // 7 multi-byte characters
        assert!(validate_password("ééééééé").is_err());
    }
}
